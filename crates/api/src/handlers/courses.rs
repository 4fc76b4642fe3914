use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use timetable_core::{
    errors::TimetableError,
    models::{
        course::{Course, CreateCourseRequest, DeleteCourseResponse, UpdateCourseRequest},
        time_slot::HOURS,
    },
};

use crate::{ApiState, middleware::error_handling::AppError};

fn validate_required(field: &str, value: &str) -> Result<(), TimetableError> {
    if value.trim().is_empty() {
        return Err(TimetableError::Validation(format!("Course {} is required", field)));
    }
    Ok(())
}

fn validate_duration(duration: u32) -> Result<(), TimetableError> {
    if duration == 0 {
        return Err(TimetableError::Validation(
            "Course duration must be at least 1 hour".to_string(),
        ));
    }
    // A block never spans more than one grid column
    if duration as usize > HOURS.len() {
        return Err(TimetableError::Validation(format!(
            "Course duration cannot exceed {} hours",
            HOURS.len()
        )));
    }
    Ok(())
}

pub async fn list_courses(State(state): State<Arc<ApiState>>) -> Json<Vec<Course>> {
    let store = state.store.lock().await;
    Json(store.timetable().courses().to_vec())
}

#[axum::debug_handler]
pub async fn create_course(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    validate_required("name", &payload.name)?;
    validate_required("lecturer", &payload.lecturer)?;
    validate_duration(payload.duration)?;

    let mut store = state.store.lock().await;
    let course = store.add_course(payload).await?;

    Ok((StatusCode::CREATED, Json(course)))
}

#[axum::debug_handler]
pub async fn update_course(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<Json<Course>, AppError> {
    if let Some(name) = &payload.name {
        validate_required("name", name)?;
    }
    if let Some(lecturer) = &payload.lecturer {
        validate_required("lecturer", lecturer)?;
    }
    if let Some(duration) = payload.duration {
        validate_duration(duration)?;
    }

    let mut store = state.store.lock().await;
    let course = store
        .update_course(&id, payload)
        .await?
        .ok_or_else(|| TimetableError::NotFound(format!("Course with ID {} not found", id)))?;

    Ok(Json(course))
}

pub async fn delete_course(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteCourseResponse>, AppError> {
    let mut store = state.store.lock().await;
    let deleted = store.delete_course(&id).await?;

    Ok(Json(DeleteCourseResponse { deleted }))
}
