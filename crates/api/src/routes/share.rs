use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/timetable/share", post(handlers::share::create_share_link))
        .route("/api/timetable/import", post(handlers::share::import_shared))
        .route("/api/shared", get(handlers::share::preview_shared))
}
