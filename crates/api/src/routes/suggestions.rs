use axum::{Router, routing::post};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/suggest-schedule",
            post(handlers::suggestions::suggest_schedule),
        )
        .route(
            "/api/timetable/suggestions",
            post(handlers::suggestions::suggest_for_timetable),
        )
        .route(
            "/api/timetable/suggestions/apply",
            post(handlers::suggestions::apply_suggestions),
        )
}
