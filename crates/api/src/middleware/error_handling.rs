//! # Error Handling Middleware
//!
//! Maps [`TimetableError`] values to HTTP status codes and `{ "error": message }`
//! JSON bodies so every handler fails the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use timetable_core::errors::TimetableError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use timetable_api::middleware::error_handling::AppError;
/// use timetable_core::errors::TimetableError;
///
/// async fn handler(id: String) -> Result<Json<String>, AppError> {
///     Err(AppError(TimetableError::NotFound(format!("Course {}", id))))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub TimetableError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TimetableError::NotFound(_) => StatusCode::NOT_FOUND,
            TimetableError::Validation(_) => StatusCode::BAD_REQUEST,
            TimetableError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TimetableError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TimetableError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            TimetableError::PaymentRequired(_) => StatusCode::PAYMENT_REQUIRED,
            TimetableError::Busy(_) => StatusCode::CONFLICT,
            TimetableError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Upstream messages are shown to the user as-is
        let message = match &self.0 {
            TimetableError::Upstream(message) => message.clone(),
            other => other.to_string(),
        };
        if status.is_server_error() {
            tracing::error!(%status, error = %self.0, "Request failed");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<TimetableError> for AppError {
    fn from(err: TimetableError) -> Self {
        AppError(err)
    }
}

/// Wraps the report in a [`TimetableError::Storage`].
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(TimetableError::Storage(err))
    }
}

pub fn map_error(err: TimetableError) -> Response {
    AppError(err).into_response()
}
