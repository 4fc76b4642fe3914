use axum::{Json, extract::State};
use std::sync::Arc;
use timetable_core::{
    advisor::apply_suggestions as apply_to_timetable,
    errors::TimetableError,
    models::{
        course::Course,
        suggestion::{
            ApplySuggestionsRequest, SuggestScheduleRequest, SuggestScheduleResponse,
            TimetableSuggestRequest,
        },
        timetable::TimetableSnapshot,
    },
};
use tracing::info;

use crate::{ApiState, middleware::error_handling::AppError};

/// Holds the single suggestion permit for the duration of the gateway call.
async fn suggest(
    state: &ApiState,
    courses: &[Course],
    preferences: &str,
) -> Result<Json<SuggestScheduleResponse>, AppError> {
    let _permit = state.suggest_gate.try_acquire().map_err(|_| {
        TimetableError::Busy("schedule suggestions are already being generated".to_string())
    })?;

    let suggestions = state.advisor.suggest(courses, preferences).await?;
    info!(count = suggestions.len(), "Generated schedule suggestions");

    Ok(Json(SuggestScheduleResponse { suggestions }))
}

/// Stateless proxy: the caller supplies the courses.
#[axum::debug_handler]
pub async fn suggest_schedule(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SuggestScheduleRequest>,
) -> Result<Json<SuggestScheduleResponse>, AppError> {
    suggest(&state, &payload.courses, &payload.preferences).await
}

#[axum::debug_handler]
pub async fn suggest_for_timetable(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<TimetableSuggestRequest>,
) -> Result<Json<SuggestScheduleResponse>, AppError> {
    // The store lock is released before the gateway call
    let courses = {
        let store = state.store.lock().await;
        store.timetable().courses().to_vec()
    };
    if courses.is_empty() {
        return Err(TimetableError::Validation("Please add some courses first".to_string()).into());
    }

    suggest(&state, &courses, &payload.preferences).await
}

#[axum::debug_handler]
pub async fn apply_suggestions(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ApplySuggestionsRequest>,
) -> Result<Json<TimetableSnapshot>, AppError> {
    let mut store = state.store.lock().await;
    store
        .apply(|timetable| apply_to_timetable(timetable, &payload.suggestions))
        .await?;

    Ok(Json(store.snapshot()))
}
