use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use std::sync::Arc;
use stowage_core::AppError;

/// Download a blob from the configured container as an attachment.
///
/// The body is proxied from storage as it arrives; a failure after the
/// first chunk terminates the stream rather than producing an error status.
#[utoipa::path(
    get,
    path = "/api/v0/files/{name}",
    tag = "files",
    params(
        ("name" = String, Path, description = "Blob name")
    ),
    responses(
        (status = 200, description = "Blob content", content_type = "application/octet-stream"),
        (status = 404, description = "Blob not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn download_file(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let container = &state.config.storage_container;

    tracing::debug!(container = %container, blob = %name, "Proxying blob from storage");

    let stream = state.storage.download_blob(container, &name).await?;

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    // Nested blob names keep only their final segment as the download filename
    let attachment_name = name.rsplit('/').next().unwrap_or(name.as_str()).to_string();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", attachment_name),
        )
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
