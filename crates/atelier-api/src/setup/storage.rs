//! Storage setup and initialization

use std::sync::Arc;

use anyhow::Result;

use atelier_core::Config;
use atelier_storage::{create_storage, WorkStorage};

/// Setup the storage gateway from configuration.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn WorkStorage>> {
    tracing::info!("Initializing storage gateway...");
    let storage = create_storage(config).await?;
    tracing::info!(
        backend = %storage.backend_type(),
        bucket = %config.storage_bucket,
        "Storage gateway initialized successfully"
    );
    Ok(storage)
}
