use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use timetable_core::{
    drag_drop::{DragEnd, DragEndResponse, DragOutcome, apply_drag_end},
    grid::{GridView, render_grid},
    models::timetable::{AssignSlotRequest, TimetableSnapshot},
};

use crate::{ApiState, middleware::error_handling::AppError};

pub async fn get_timetable(State(state): State<Arc<ApiState>>) -> Json<TimetableSnapshot> {
    let store = state.store.lock().await;
    Json(store.snapshot())
}

pub async fn get_grid(State(state): State<Arc<ApiState>>) -> Json<GridView> {
    let store = state.store.lock().await;
    Json(render_grid(store.timetable()))
}

/// Unknown course or slot ids leave the timetable untouched.
#[axum::debug_handler]
pub async fn assign_slot(
    State(state): State<Arc<ApiState>>,
    Path(slot_id): Path<String>,
    Json(payload): Json<AssignSlotRequest>,
) -> Result<Json<TimetableSnapshot>, AppError> {
    let mut store = state.store.lock().await;
    store
        .assign_course_to_slot(&payload.course_id, &slot_id)
        .await?;

    Ok(Json(store.snapshot()))
}

pub async fn remove_slot(
    State(state): State<Arc<ApiState>>,
    Path(slot_id): Path<String>,
) -> Result<Json<TimetableSnapshot>, AppError> {
    let mut store = state.store.lock().await;
    store.remove_course_from_slot(&slot_id).await?;

    Ok(Json(store.snapshot()))
}

#[axum::debug_handler]
pub async fn drag_end(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<DragEnd>,
) -> Result<Json<DragEndResponse>, AppError> {
    let mut store = state.store.lock().await;

    let mut outcome = DragOutcome::Ignored;
    store
        .apply(|timetable| {
            outcome = apply_drag_end(timetable, &payload);
            outcome.is_assigned()
        })
        .await?;

    Ok(Json(DragEndResponse {
        outcome,
        timetable: store.snapshot(),
    }))
}
