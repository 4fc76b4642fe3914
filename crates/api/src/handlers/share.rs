use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;
use timetable_core::{
    errors::TimetableError,
    models::timetable::{
        ImportSharedRequest, ShareLinkResponse, SharedPreviewResponse, SharedQuery,
        TimetableSnapshot,
    },
    share::{decode_shared, generate_share_link, load_shared_input},
    timetable::Timetable,
};
use tracing::info;

use crate::{ApiState, middleware::error_handling::AppError};

pub async fn create_share_link(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ShareLinkResponse>, AppError> {
    let store = state.store.lock().await;
    let url = generate_share_link(&state.public_url, store.timetable())?;

    Ok(Json(ShareLinkResponse { url }))
}

/// Decodes the `shared` parameter without touching the stored timetable.
pub async fn preview_shared(Query(query): Query<SharedQuery>) -> Json<SharedPreviewResponse> {
    let timetable = query
        .shared
        .as_deref()
        .and_then(decode_shared)
        .map(|snapshot| Timetable::from_snapshot(snapshot).snapshot());

    Json(SharedPreviewResponse { timetable })
}

#[axum::debug_handler]
pub async fn import_shared(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ImportSharedRequest>,
) -> Result<Json<TimetableSnapshot>, AppError> {
    let snapshot = load_shared_input(&payload.shared).ok_or_else(|| {
        TimetableError::Validation("Shared link contains no timetable data".to_string())
    })?;

    let mut store = state.store.lock().await;
    let changed = store.replace_with(snapshot).await?;
    info!(changed, "Imported shared timetable");

    Ok(Json(store.snapshot()))
}
