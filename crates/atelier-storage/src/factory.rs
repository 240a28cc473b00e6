use std::sync::Arc;

use crate::{LocalStorage, S3Storage, StorageError, StorageResult, WorkStorage};
use atelier_core::{Config, StorageBackend};

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn WorkStorage>> {
    match config.storage_backend {
        StorageBackend::S3 => {
            let region = config
                .s3_region
                .clone()
                .ok_or_else(|| StorageError::ConfigError("S3_REGION not configured".to_string()))?;
            let public_url_base = config.storage_public_url_base.clone().ok_or_else(|| {
                StorageError::ConfigError("STORAGE_PUBLIC_URL_BASE not configured".to_string())
            })?;

            let storage = S3Storage::new(
                config.storage_bucket.clone(),
                region,
                config.s3_endpoint.clone(),
                public_url_base,
            )?;
            Ok(Arc::new(storage))
        }
        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.local_storage_base_url.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;

            let storage =
                LocalStorage::new(base_path, base_url, config.storage_bucket.clone()).await?;
            Ok(Arc::new(storage))
        }
    }
}
