use crate::names::{validate_blob_name, validate_container_name};
use crate::traits::{
    BlobByteStream, BlobNameStream, BlobStore, StorageError, StorageOp, StorageResult,
};
use crate::StorageBackend;
use async_trait::async_trait;
use futures::stream;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::fs;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

/// Local filesystem store implementation
///
/// Containers are directories under the base path; blobs are files within
/// them. Used for development and tests, with the same naming rules and
/// error taxonomy as the remote backend.
#[derive(Clone)]
pub struct LocalBlobStore {
    base_path: PathBuf,
}

impl LocalBlobStore {
    /// Create a new LocalBlobStore instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for blob storage (e.g., "/var/lib/stowage")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalBlobStore { base_path })
    }

    fn container_path(&self, container: &str) -> StorageResult<PathBuf> {
        validate_container_name(container)?;
        Ok(self.base_path.join(container))
    }

    fn blob_path(&self, container: &str, blob: &str) -> StorageResult<PathBuf> {
        validate_blob_name(blob)?;
        Ok(self.container_path(container)?.join(blob))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Walk the container directory and collect blob names relative to it.
    async fn collect_names(container_dir: &Path) -> std::io::Result<Vec<String>> {
        let mut names = Vec::new();
        let mut pending = vec![container_dir.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    pending.push(path);
                } else if let Ok(relative) = path.strip_prefix(container_dir) {
                    names.push(relative.to_string_lossy().replace('\\', "/"));
                }
            }
        }

        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn list_blobs(&self, container: &str) -> StorageResult<BlobNameStream> {
        let container_dir = self.container_path(container)?;

        if !fs::try_exists(&container_dir).await.unwrap_or(false) {
            return Err(StorageError::ContainerNotFound(container.to_string()));
        }

        let names = Self::collect_names(&container_dir).await.map_err(|e| {
            tracing::error!(
                error = %e,
                container = %container,
                path = %container_dir.display(),
                "Blob listing failed"
            );
            StorageError::operation(StorageOp::List, container, None, e)
        })?;

        tracing::debug!(
            container = %container,
            count = names.len(),
            "Blob listing successful"
        );

        Ok(Box::pin(stream::iter(names.into_iter().map(Ok))))
    }

    async fn upload_blob(
        &self,
        container: &str,
        blob: &str,
        _content_type: &str,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<()> {
        let path = self.blob_path(container, blob)?;
        let start = std::time::Instant::now();

        // Creating the parent chain doubles as the idempotent container create
        self.ensure_parent_dir(&path).await?;

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::operation(
                StorageOp::Upload,
                container,
                Some(blob),
                format!("Failed to create file {}: {}", path.display(), e),
            )
        })?;

        let bytes_copied = tokio::io::copy(&mut reader, &mut file).await.map_err(|e| {
            StorageError::operation(
                StorageOp::Upload,
                container,
                Some(blob),
                format!("Failed to write file {}: {}", path.display(), e),
            )
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::operation(
                StorageOp::Upload,
                container,
                Some(blob),
                format!("Failed to sync file {}: {}", path.display(), e),
            )
        })?;

        tracing::info!(
            container = %container,
            blob = %blob,
            size_bytes = bytes_copied,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Blob upload successful"
        );

        Ok(())
    }

    async fn download_blob(&self, container: &str, blob: &str) -> StorageResult<BlobByteStream> {
        let path = self.blob_path(container, blob)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound {
                container: container.to_string(),
                blob: blob.to_string(),
            });
        }

        let file = fs::File::open(&path).await.map_err(|e| {
            StorageError::operation(
                StorageOp::Download,
                container,
                Some(blob),
                format!("Failed to open file {}: {}", path.display(), e),
            )
        })?;

        let container_owned = container.to_string();
        let blob_owned = blob.to_string();
        let stream = ReaderStream::new(file).map(move |result| {
            result.map_err(|e| {
                tracing::error!(
                    error = %e,
                    container = %container_owned,
                    blob = %blob_owned,
                    "Blob download stream error"
                );
                StorageError::operation(StorageOp::Read, &container_owned, Some(&blob_owned), e)
            })
        });

        Ok(Box::pin(stream))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tempfile::tempdir;

    fn reader(data: &[u8]) -> Pin<Box<dyn AsyncRead + Send + Unpin>> {
        Box::pin(std::io::Cursor::new(data.to_vec()))
    }

    async fn read_all(mut stream: BlobByteStream) -> Vec<u8> {
        let mut data = Vec::new();
        while let Some(chunk) = stream.next().await {
            data.extend_from_slice(&chunk.unwrap());
        }
        data
    }

    async fn list_names(store: &LocalBlobStore, container: &str) -> Vec<String> {
        let mut stream = store.list_blobs(container).await.unwrap();
        let mut names = Vec::new();
        while let Some(name) = stream.next().await {
            names.push(name.unwrap());
        }
        names
    }

    #[tokio::test]
    async fn test_upload_download_round_trip() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        let data = b"round trip data";
        store
            .upload_blob("samples", "data.bin", "application/octet-stream", reader(data))
            .await
            .unwrap();

        let downloaded = read_all(store.download_blob("samples", "data.bin").await.unwrap()).await;
        assert_eq!(downloaded, data);
    }

    #[tokio::test]
    async fn test_reupload_overwrites() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        store
            .upload_blob("samples", "note.txt", "text/plain", reader(b"first"))
            .await
            .unwrap();
        store
            .upload_blob("samples", "note.txt", "text/plain", reader(b"second"))
            .await
            .unwrap();

        let downloaded = read_all(store.download_blob("samples", "note.txt").await.unwrap()).await;
        assert_eq!(downloaded, b"second");
    }

    #[tokio::test]
    async fn test_list_empty_container() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        tokio::fs::create_dir_all(dir.path().join("empty"))
            .await
            .unwrap();

        assert!(list_names(&store, "empty").await.is_empty());
    }

    #[tokio::test]
    async fn test_list_returns_exactly_uploaded_names() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        let uploaded = ["a.txt", "b.txt", "nested/c.txt"];
        for name in &uploaded {
            store
                .upload_blob("samples", name, "text/plain", reader(b"x"))
                .await
                .unwrap();
        }

        let mut listed = list_names(&store, "samples").await;
        listed.sort();
        let mut expected: Vec<String> = uploaded.iter().map(|s| s.to_string()).collect();
        expected.sort();
        assert_eq!(listed, expected);
    }

    #[tokio::test]
    async fn test_list_missing_container_fails() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        let result = store.list_blobs("nonexistent").await;
        assert!(matches!(
            result,
            Err(StorageError::ContainerNotFound(ref c)) if c == "nonexistent"
        ));
    }

    #[tokio::test]
    async fn test_save_text_round_trip() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        store
            .save_text("samples", "greeting.txt", "hello world")
            .await
            .unwrap();

        let downloaded =
            read_all(store.download_blob("samples", "greeting.txt").await.unwrap()).await;
        assert_eq!(String::from_utf8(downloaded).unwrap(), "hello world");
    }

    #[tokio::test]
    async fn test_download_missing_blob_fails_without_stream() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        let result = store.download_blob("samples", "never-uploaded.txt").await;
        assert!(matches!(result, Err(StorageError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_uploads_distinct_names() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        let (a, b, c) = tokio::join!(
            store.upload_blob("samples", "one.bin", "application/octet-stream", reader(b"one")),
            store.upload_blob("samples", "two.bin", "application/octet-stream", reader(b"two")),
            store.upload_blob("samples", "three.bin", "application/octet-stream", reader(b"three")),
        );
        a.unwrap();
        b.unwrap();
        c.unwrap();

        for (name, content) in [("one.bin", b"one" as &[u8]), ("two.bin", b"two"), ("three.bin", b"three")] {
            let downloaded = read_all(store.download_blob("samples", name).await.unwrap()).await;
            assert_eq!(downloaded, content);
        }
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path()).await.unwrap();

        let result = store.download_blob("samples", "../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidName(_))));

        let result = store
            .upload_blob("..", "x.txt", "text/plain", reader(b"x"))
            .await;
        assert!(matches!(result, Err(StorageError::InvalidName(_))));

        let result = store.list_blobs("a/b").await;
        assert!(matches!(result, Err(StorageError::InvalidName(_))));
    }
}
