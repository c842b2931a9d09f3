//! Stowage Storage Library
//!
//! This crate provides the object-storage client facade and its backends.
//! It includes the BlobStore trait, a credential resolver for the S3
//! backend, and implementations for S3-compatible stores and the local
//! filesystem.
//!
//! # Naming model
//!
//! A blob is addressed by a (container, blob) pair. Container names are
//! single path segments; blob names may contain `/` but never `..` or a
//! leading `/`. Validation is centralized in the `names` module so all
//! backends stay consistent.

#[cfg(feature = "storage-s3")]
pub mod credentials;
pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
pub(crate) mod names;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_blob_store;
#[cfg(feature = "storage-local")]
pub use local::LocalBlobStore;
#[cfg(feature = "storage-s3")]
pub use s3::S3BlobStore;
pub use stowage_core::StorageBackend;
pub use traits::{
    BlobByteStream, BlobNameStream, BlobStore, StorageError, StorageOp, StorageResult,
};
