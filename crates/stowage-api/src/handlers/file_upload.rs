use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::pin::Pin;
use std::sync::Arc;
use stowage_core::AppError;
use tokio::io::AsyncRead;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub file_name: String,
    pub container: String,
}

/// Upload a file into the configured container.
///
/// The first multipart field carrying a filename is stored under that name,
/// overwriting any existing blob with the same name.
///
/// # Errors
/// - `AppError::InvalidInput` - No file field, empty file, or invalid name
/// - `AppError::Storage` - Storage upload failure
#[utoipa::path(
    post,
    path = "/api/v0/files",
    tag = "files",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File uploaded successfully", body = UploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let container = state.config.storage_container.clone();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::InvalidInput(format!("Invalid multipart request: {}", e))
    })? {
        let Some(file_name) = field.file_name().map(ToString::to_string) else {
            continue;
        };
        // Browsers may submit a full client-side path; keep only the final segment.
        let file_name = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(file_name.as_str())
            .to_string();
        if file_name.is_empty() {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = field.bytes().await.map_err(|e| {
            AppError::InvalidInput(format!("Failed to read uploaded file: {}", e))
        })?;
        if data.is_empty() {
            return Err(AppError::InvalidInput("File is empty".to_string()).into());
        }

        let reader: Pin<Box<dyn AsyncRead + Send + Unpin>> =
            Box::pin(std::io::Cursor::new(data));
        state
            .storage
            .upload_blob(&container, &file_name, &content_type, reader)
            .await?;

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                file_name,
                container,
            }),
        ));
    }

    Err(AppError::InvalidInput("No file field in multipart request".to_string()).into())
}
