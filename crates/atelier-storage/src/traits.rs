//! Storage abstraction trait
//!
//! This module defines the trait that all storage backends must implement.

use async_trait::async_trait;
use thiserror::Error;

use crate::keys::ObjectFolder;
use atelier_core::StorageBackend;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for atelier_core::AppError {
    fn from(err: StorageError) -> Self {
        use atelier_core::AppError;
        match err {
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::IoError(e) => AppError::Storage(format!("IO error: {}", e)),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// A stored object: its internal key and the public URL it is served at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedObject {
    pub key: String,
    pub public_url: String,
}

/// Storage gateway for work images.
///
/// Backends (S3, local filesystem) implement this trait so the work
/// service never couples to a specific provider. Uploads generate a fresh
/// key per call and must never overwrite an existing object.
#[async_trait]
pub trait WorkStorage: Send + Sync {
    /// Store a file under a freshly generated key in the given folder and
    /// return its key and public URL.
    async fn upload(
        &self,
        folder: ObjectFolder,
        original_filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<UploadedObject>;

    /// Delete one object by key. Best-effort batch semantics (log and
    /// continue) live in the caller.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Reverse a public URL back to its internal key by locating the fixed
    /// URL-structure marker. Returns `None` for URLs that do not match
    /// (e.g. externally hosted images) so cleanup is safely skipped.
    fn public_url_to_key(&self, url: &str) -> Option<String>;

    /// Which backend this is, for startup logging.
    fn backend_type(&self) -> StorageBackend;
}
