use axum::{Json, extract::State};
use chrono::Utc;
use std::sync::Arc;
use timetable_core::{calendar::export_calendar_links, models::timetable::CalendarExportResponse};

use crate::{ApiState, middleware::error_handling::AppError};

/// Weekly recurring event links, anchored at the next occurrence of each
/// course in the configured zone.
pub async fn export_calendar(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<CalendarExportResponse>, AppError> {
    let now = Utc::now().with_timezone(&state.timezone);
    let store = state.store.lock().await;
    let events = export_calendar_links(store.timetable(), now)?;

    Ok(Json(CalendarExportResponse { events }))
}
