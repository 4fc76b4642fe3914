use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use timetable_core::{
    errors::{TimetableError, TimetableResult},
    export::{PDF_FILENAME, PNG_FILENAME, export_pdf, export_png},
    grid::{GridView, render_grid},
};

use crate::{ApiState, middleware::error_handling::AppError};

async fn current_grid(state: &ApiState) -> GridView {
    let store = state.store.lock().await;
    render_grid(store.timetable())
}

/// Encodes off the async runtime; the raster is a few megabytes.
async fn encode<F>(grid: GridView, encoder: F) -> Result<Vec<u8>, AppError>
where
    F: FnOnce(&GridView) -> TimetableResult<Vec<u8>> + Send + 'static,
{
    let bytes = tokio::task::spawn_blocking(move || encoder(&grid))
        .await
        .map_err(|e| TimetableError::Internal(Box::new(e)))??;
    Ok(bytes)
}

fn attachment(content_type: &'static str, filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

pub async fn export_png_image(State(state): State<Arc<ApiState>>) -> Result<Response, AppError> {
    let grid = current_grid(&state).await;
    let bytes = encode(grid, export_png).await?;
    Ok(attachment("image/png", PNG_FILENAME, bytes))
}

pub async fn export_pdf_document(
    State(state): State<Arc<ApiState>>,
) -> Result<Response, AppError> {
    let grid = current_grid(&state).await;
    let bytes = encode(grid, export_pdf).await?;
    Ok(attachment("application/pdf", PDF_FILENAME, bytes))
}
