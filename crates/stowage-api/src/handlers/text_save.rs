use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stowage_core::AppError;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveTextRequest {
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaveTextResponse {
    pub file_name: String,
    pub container: String,
}

/// Store a text snippet as a blob in the configured container.
///
/// Names without a `.txt` extension get one appended before storing.
#[utoipa::path(
    post,
    path = "/api/v0/text",
    tag = "text",
    request_body = SaveTextRequest,
    responses(
        (status = 201, description = "Text saved successfully", body = SaveTextResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn save_text(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<SaveTextRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if request.file_name.trim().is_empty() {
        return Err(AppError::InvalidInput("file_name must not be empty".to_string()).into());
    }
    if request.content.is_empty() {
        return Err(AppError::InvalidInput("content must not be empty".to_string()).into());
    }

    let file_name = if request.file_name.ends_with(".txt") {
        request.file_name
    } else {
        format!("{}.txt", request.file_name)
    };

    let container = state.config.storage_container.clone();
    state
        .storage
        .save_text(&container, &file_name, &request.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SaveTextResponse {
            file_name,
            container,
        }),
    ))
}
