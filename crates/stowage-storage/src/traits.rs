//! Storage facade trait
//!
//! This module defines the BlobStore trait that all storage backends must
//! implement, and the error taxonomy every operation reports through.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// The facade operation an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    List,
    CreateContainer,
    Upload,
    Download,
    /// Reading an already-open download stream. Distinct from `Download` so
    /// callers can tell a failed call from a failed body read.
    Read,
}

impl StorageOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::CreateContainer => "create-container",
            Self::Upload => "upload",
            Self::Download => "download",
            Self::Read => "read",
        }
    }
}

impl std::fmt::Display for StorageOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn format_target(container: &str, blob: Option<&str>) -> String {
    match blob {
        Some(blob) => format!("{}/{}", container, blob),
        None => container.to_string(),
    }
}

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{operation} failed for '{}': {cause}", format_target(.container, .blob.as_deref()))]
    OperationFailed {
        operation: StorageOp,
        container: String,
        blob: Option<String>,
        cause: String,
    },

    #[error("Blob not found: {container}/{blob}")]
    NotFound { container: String, blob: String },

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("No credential available: {0}")]
    NoCredentialAvailable(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StorageError {
    /// Build an `OperationFailed` with the standard context attached.
    pub fn operation(
        operation: StorageOp,
        container: &str,
        blob: Option<&str>,
        cause: impl std::fmt::Display,
    ) -> Self {
        StorageError::OperationFailed {
            operation,
            container: container.to_string(),
            blob: blob.map(String::from),
            cause: cause.to_string(),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A lazy, finite, non-restartable stream of blob names within a container.
/// The listing is a point-in-time snapshot; consumers may stop early.
pub type BlobNameStream = Pin<Box<dyn Stream<Item = StorageResult<String>> + Send>>;

/// A caller-owned stream of downloaded content chunks.
pub type BlobByteStream = Pin<Box<dyn Stream<Item = StorageResult<Bytes>> + Send>>;

/// Object-storage facade trait
///
/// All storage backends (S3-compatible, local filesystem) implement this
/// trait. Every operation is stateless and independent: the backend holds
/// only its fixed endpoint and credential chain, never blob content. No
/// operation retries internally; retry policy belongs to the caller or the
/// transport layer.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// List the blob names in a container, paging through the backend lazily.
    ///
    /// Listing a container that does not exist fails with
    /// `ContainerNotFound` (either from this call or as the stream's first
    /// item, depending on when the backend first talks to the store).
    async fn list_blobs(&self, container: &str) -> StorageResult<BlobNameStream>;

    /// Overwrite the named blob with the full contents of `reader`.
    ///
    /// The container is created first if absent (idempotent). The reader is
    /// consumed to EOF; any resource behind it stays owned by the caller.
    /// On failure the blob's previous state is unspecified: it may be
    /// untouched or partially written depending on the transport.
    async fn upload_blob(
        &self,
        container: &str,
        blob: &str,
        content_type: &str,
        reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<()>;

    /// Open a download stream for the named blob.
    ///
    /// Fails with `NotFound` before any stream exists when the blob is
    /// absent. Once a stream is returned, read failures are yielded as
    /// `Read` operation errors from the stream itself.
    async fn download_blob(&self, container: &str, blob: &str) -> StorageResult<BlobByteStream>;

    /// Store `text` as a UTF-8 blob. Convenience over the upload path;
    /// filename normalization is a caller-side policy, not done here.
    async fn save_text(&self, container: &str, blob: &str, text: &str) -> StorageResult<()> {
        let data = text.as_bytes().to_vec();
        let reader: Pin<Box<dyn AsyncRead + Send + Unpin>> =
            Box::pin(std::io::Cursor::new(data));
        self.upload_blob(container, blob, "text/plain; charset=utf-8", reader)
            .await
    }

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_failed_display_with_blob() {
        let err = StorageError::operation(
            StorageOp::Upload,
            "samples",
            Some("report.pdf"),
            "connection reset",
        );
        let rendered = err.to_string();
        assert!(rendered.contains("upload"));
        assert!(rendered.contains("samples/report.pdf"));
        assert!(rendered.contains("connection reset"));
    }

    #[test]
    fn test_operation_failed_display_without_blob() {
        let err = StorageError::operation(StorageOp::List, "samples", None, "timeout");
        let rendered = err.to_string();
        assert!(rendered.contains("list"));
        assert!(rendered.contains("'samples'"));
        assert!(!rendered.contains("samples/"));
    }

    #[test]
    fn test_not_found_display() {
        let err = StorageError::NotFound {
            container: "samples".to_string(),
            blob: "missing.txt".to_string(),
        };
        assert_eq!(err.to_string(), "Blob not found: samples/missing.txt");
    }
}
