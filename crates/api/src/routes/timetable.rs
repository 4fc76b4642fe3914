use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/timetable", get(handlers::timetable::get_timetable))
        .route("/api/timetable/grid", get(handlers::timetable::get_grid))
        .route(
            "/api/timetable/slots/:slot_id",
            post(handlers::timetable::assign_slot).delete(handlers::timetable::remove_slot),
        )
        .route("/api/timetable/drag-end", post(handlers::timetable::drag_end))
        .route("/api/timetable/calendar", get(handlers::calendar::export_calendar))
        .route("/api/timetable/export.png", get(handlers::export::export_png_image))
        .route("/api/timetable/export.pdf", get(handlers::export::export_pdf_document))
}
