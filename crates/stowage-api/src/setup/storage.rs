//! Storage setup and initialization

use anyhow::Result;
use std::sync::Arc;
use stowage_core::Config;
use stowage_storage::{create_blob_store, BlobStore};

/// Setup the storage facade from configuration.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn BlobStore>> {
    tracing::info!("Initializing storage facade...");
    let storage = create_blob_store(config).await?;
    tracing::info!(
        backend = ?storage.backend_type(),
        container = %config.storage_container,
        "Storage facade initialized successfully"
    );

    Ok(storage)
}
