use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
#[allow(unused_imports)]
use object_store::{
    Error as ObjectStoreError, ObjectStore, ObjectStoreExt, PutMode, PutOptions, PutPayload,
    Result as ObjectResult,
};

use crate::keys::{self, ObjectFolder};
use crate::traits::{StorageError, StorageResult, UploadedObject, WorkStorage};
use atelier_core::StorageBackend;

/// S3-compatible storage implementation
#[derive(Debug)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    public_url_base: String,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - bucket name
    /// * `region` - region identifier
    /// * `endpoint_url` - optional custom endpoint for S3-compatible
    ///   providers (MinIO, Supabase Storage, DigitalOcean Spaces, ...)
    /// * `public_url_base` - host prefix ahead of the public-URL marker
    ///
    /// Credentials (the privileged read-write key pair) come from the
    /// standard AWS environment variables via `AmazonS3Builder::from_env`.
    pub fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        public_url_base: String,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            public_url_base,
        })
    }
}

#[async_trait]
impl WorkStorage for S3Storage {
    async fn upload(
        &self,
        folder: ObjectFolder,
        original_filename: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<UploadedObject> {
        let key = keys::generate_object_key(folder, original_filename);
        let size = data.len() as u64;
        let bytes = Bytes::from(data);
        let location = Path::from(key.clone());

        let start = std::time::Instant::now();

        // PutMode::Create refuses to overwrite an existing key.
        let result: ObjectResult<_> = self
            .store
            .put_opts(
                &location,
                PutPayload::from(bytes),
                PutOptions::from(PutMode::Create),
            )
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let public_url = keys::public_url(&self.public_url_base, &self.bucket, &key);

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(UploadedObject { key, public_url })
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();
        let location = Path::from(key.to_string());

        let result: ObjectResult<_> = self.store.delete(&location).await;

        result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(key.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete failed"
                );
                StorageError::DeleteFailed(other.to_string())
            }
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 delete successful"
        );

        Ok(())
    }

    fn public_url_to_key(&self, url: &str) -> Option<String> {
        keys::url_to_key(url, &self.bucket)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
