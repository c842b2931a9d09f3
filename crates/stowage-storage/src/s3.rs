use crate::credentials::build_credential_chain;
use crate::names::{validate_blob_name, validate_container_name};
use crate::traits::{
    BlobByteStream, BlobNameStream, BlobStore, StorageError, StorageOp, StorageResult,
};
use crate::StorageBackend;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use bytes::Bytes;
use futures::stream;
use futures::StreamExt;
use std::pin::Pin;
use stowage_core::CredentialProvider;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::io::ReaderStream;

/// S3-compatible object store implementation
///
/// Containers map to buckets and blobs to object keys. The endpoint is
/// fixed at construction and always addressed path-style, which covers
/// MinIO, DigitalOcean Spaces, and other S3-compatible stores as well as
/// AWS itself.
#[derive(Clone)]
pub struct S3BlobStore {
    client: Client,
    region: String,
}

impl S3BlobStore {
    /// Create a new S3BlobStore instance
    ///
    /// # Arguments
    /// * `endpoint` - Storage endpoint URL (e.g., "http://localhost:9000"
    ///   for MinIO, "https://nyc3.digitaloceanspaces.com" for DigitalOcean Spaces)
    /// * `region` - Region identifier for the endpoint
    /// * `providers` - Ordered credential provider kinds for the resolver chain
    pub async fn new(
        endpoint: String,
        region: String,
        providers: &[CredentialProvider],
    ) -> StorageResult<Self> {
        let chain = build_credential_chain(providers)?;

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.clone()))
            .credentials_provider(chain)
            .load()
            .await;

        // Path-style addressing is required for most S3-compatible providers
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .endpoint_url(&endpoint)
            .force_path_style(true)
            .build();

        Ok(S3BlobStore {
            client: Client::from_conf(s3_config),
            region,
        })
    }

    /// Idempotent container create: "already exists" outcomes are success.
    async fn ensure_container(&self, container: &str) -> StorageResult<()> {
        let mut request = self.client.create_bucket().bucket(container);

        // us-east-1 is the implicit default and must not be sent as a constraint
        if self.region != "us-east-1" {
            let constraint = BucketLocationConstraint::from(self.region.as_str());
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(constraint)
                    .build(),
            );
        }

        match request.send().await {
            Ok(_) => {
                tracing::info!(container = %container, "Container created");
                Ok(())
            }
            Err(e) => {
                if let SdkError::ServiceError(ref service_err) = e {
                    if matches!(
                        service_err.err(),
                        CreateBucketError::BucketAlreadyOwnedByYou(_)
                            | CreateBucketError::BucketAlreadyExists(_)
                    ) {
                        return Ok(());
                    }
                }
                tracing::error!(
                    error = %e,
                    container = %container,
                    "Container create failed"
                );
                Err(StorageError::operation(
                    StorageOp::CreateContainer,
                    container,
                    None,
                    &e,
                ))
            }
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn list_blobs(&self, container: &str) -> StorageResult<BlobNameStream> {
        validate_container_name(container)?;

        let paginator = self
            .client
            .list_objects_v2()
            .bucket(container)
            .into_paginator()
            .send();

        // Pages are fetched on demand as the stream is polled; stopping
        // early never issues further listing calls.
        let pages = stream::unfold(paginator, |mut paginator| async move {
            paginator.next().await.map(|page| (page, paginator))
        });

        let container_owned = container.to_string();
        let names = pages
            .map(move |page| match page {
                Ok(output) => {
                    let keys: Vec<StorageResult<String>> = output
                        .contents
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|object| object.key)
                        .map(Ok)
                        .collect();
                    stream::iter(keys)
                }
                Err(e) => {
                    let err = match &e {
                        SdkError::ServiceError(service_err)
                            if matches!(service_err.err(), ListObjectsV2Error::NoSuchBucket(_)) =>
                        {
                            StorageError::ContainerNotFound(container_owned.clone())
                        }
                        _ => {
                            tracing::error!(
                                error = %e,
                                container = %container_owned,
                                "Blob listing failed"
                            );
                            StorageError::operation(StorageOp::List, &container_owned, None, &e)
                        }
                    };
                    stream::iter(vec![Err(err)])
                }
            })
            .flatten();

        Ok(Box::pin(names))
    }

    async fn upload_blob(
        &self,
        container: &str,
        blob: &str,
        content_type: &str,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<()> {
        validate_container_name(container)?;
        validate_blob_name(blob)?;

        self.ensure_container(container).await?;

        let start = std::time::Instant::now();

        let mut buffer = Vec::new();
        let mut temp_buf = vec![0u8; 8192];
        loop {
            let bytes_read = reader.read(&mut temp_buf).await.map_err(|e| {
                StorageError::operation(
                    StorageOp::Upload,
                    container,
                    Some(blob),
                    format!("Failed to read from input stream: {}", e),
                )
            })?;
            if bytes_read == 0 {
                break;
            }
            buffer.extend_from_slice(&temp_buf[..bytes_read]);
        }

        let size = buffer.len() as u64;
        let body = ByteStream::from(Bytes::from(buffer));

        self.client
            .put_object()
            .bucket(container)
            .key(blob)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    container = %container,
                    blob = %blob,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Blob upload failed"
                );
                StorageError::operation(StorageOp::Upload, container, Some(blob), &e)
            })?;

        tracing::info!(
            container = %container,
            blob = %blob,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Blob upload successful"
        );

        Ok(())
    }

    async fn download_blob(&self, container: &str, blob: &str) -> StorageResult<BlobByteStream> {
        validate_container_name(container)?;
        validate_blob_name(blob)?;

        let start = std::time::Instant::now();

        let response = self
            .client
            .get_object()
            .bucket(container)
            .key(blob)
            .send()
            .await
            .map_err(|e| match &e {
                SdkError::ServiceError(service_err) => match service_err.err() {
                    GetObjectError::NoSuchKey(_) => StorageError::NotFound {
                        container: container.to_string(),
                        blob: blob.to_string(),
                    },
                    _ => {
                        tracing::error!(
                            error = %e,
                            container = %container,
                            blob = %blob,
                            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                            "Blob download failed"
                        );
                        StorageError::operation(StorageOp::Download, container, Some(blob), &e)
                    }
                },
                _ => {
                    tracing::error!(
                        error = %e,
                        container = %container,
                        blob = %blob,
                        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "Blob download failed"
                    );
                    StorageError::operation(StorageOp::Download, container, Some(blob), &e)
                }
            })?;

        let container_owned = container.to_string();
        let blob_owned = blob.to_string();
        let async_read = response.body.into_async_read();
        let stream = ReaderStream::new(async_read).map(move |result| {
            result.map_err(|e| {
                tracing::error!(
                    error = %e,
                    container = %container_owned,
                    blob = %blob_owned,
                    "Blob download stream error"
                );
                StorageError::operation(StorageOp::Read, &container_owned, Some(&blob_owned), &e)
            })
        });

        Ok(Box::pin(stream))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
