//! Shared name validation for storage backends.
//!
//! Container names are single path segments; blob names may contain `/`
//! but never `..` or a leading `/`. All backends validate through here so
//! a hostile name is rejected before any remote or filesystem access.

use crate::traits::{StorageError, StorageResult};

/// Validate a container name: non-empty single path segment.
pub fn validate_container_name(container: &str) -> StorageResult<()> {
    if container.is_empty() {
        return Err(StorageError::InvalidName(
            "Container name must not be empty".to_string(),
        ));
    }
    if container.contains('/') || container.contains('\\') || container.contains("..") {
        return Err(StorageError::InvalidName(format!(
            "Container name '{}' contains invalid characters",
            container
        )));
    }
    Ok(())
}

/// Validate a blob name: non-empty, no traversal, no absolute path.
pub fn validate_blob_name(blob: &str) -> StorageResult<()> {
    if blob.is_empty() {
        return Err(StorageError::InvalidName(
            "Blob name must not be empty".to_string(),
        ));
    }
    if blob.contains("..") || blob.starts_with('/') || blob.contains('\\') {
        return Err(StorageError::InvalidName(format!(
            "Blob name '{}' contains invalid characters",
            blob
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_container_name("samples").is_ok());
        assert!(validate_container_name("my-container.v2").is_ok());
        assert!(validate_blob_name("notes.txt").is_ok());
        assert!(validate_blob_name("reports/2026/q1.pdf").is_ok());
    }

    #[test]
    fn test_container_rejects_separators_and_traversal() {
        assert!(matches!(
            validate_container_name("a/b"),
            Err(StorageError::InvalidName(_))
        ));
        assert!(matches!(
            validate_container_name(".."),
            Err(StorageError::InvalidName(_))
        ));
        assert!(matches!(
            validate_container_name(""),
            Err(StorageError::InvalidName(_))
        ));
    }

    #[test]
    fn test_blob_rejects_traversal_and_absolute() {
        assert!(matches!(
            validate_blob_name("../etc/passwd"),
            Err(StorageError::InvalidName(_))
        ));
        assert!(matches!(
            validate_blob_name("/etc/passwd"),
            Err(StorageError::InvalidName(_))
        ));
        assert!(matches!(
            validate_blob_name("a/../b"),
            Err(StorageError::InvalidName(_))
        ));
        assert!(matches!(
            validate_blob_name(""),
            Err(StorageError::InvalidName(_))
        ));
    }
}
