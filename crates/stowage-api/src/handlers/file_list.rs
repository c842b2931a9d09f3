use crate::state::AppState;
use axum::{extract::State, Json};
use futures::StreamExt;
use serde::Serialize;
use std::sync::Arc;
use stowage_storage::StorageError;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct FileListResponse {
    pub container: String,
    pub files: Vec<String>,
}

/// List the blob names in the configured container.
///
/// A listing failure is rendered as an empty list rather than an error;
/// the cause is logged where it occurs.
#[utoipa::path(
    get,
    path = "/api/v0/files",
    tag = "files",
    responses(
        (status = 200, description = "Blob names in the container", body = FileListResponse)
    )
)]
pub async fn list_files(State(state): State<Arc<AppState>>) -> Json<FileListResponse> {
    let container = state.config.storage_container.clone();

    let files = match collect_blob_names(&state, &container).await {
        Ok(files) => files,
        Err(e) => {
            tracing::error!(error = %e, container = %container, "Error loading blob list");
            Vec::new()
        }
    };

    Json(FileListResponse { container, files })
}

async fn collect_blob_names(
    state: &AppState,
    container: &str,
) -> Result<Vec<String>, StorageError> {
    let mut stream = state.storage.list_blobs(container).await?;
    let mut files = Vec::new();
    while let Some(name) = stream.next().await {
        files.push(name?);
    }
    Ok(files)
}
