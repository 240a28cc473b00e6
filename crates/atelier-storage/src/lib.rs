//! Storage gateway for uploaded work images.
//!
//! This crate provides the storage abstraction and its backends: an
//! S3-compatible object store for production and a local filesystem
//! backend for development and tests.
//!
//! # Object key format
//!
//! Keys are `{folder}/{unix_millis}-{uuid}.{ext}` with folder one of
//! `covers` or `gallery` and the extension normalized to the image
//! whitelist. Keys must not contain `..` or a leading `/`. Key and public
//! URL construction is centralized in the `keys` module so all backends
//! stay consistent, and the public URL embeds a fixed marker segment so a
//! URL can be reversed back to its key for deletion.

pub mod factory;
pub mod keys;
pub mod local;
pub mod s3;
pub mod traits;

pub use atelier_core::StorageBackend;
pub use factory::create_storage;
pub use keys::ObjectFolder;
pub use local::LocalStorage;
pub use s3::S3Storage;
pub use traits::{StorageError, StorageResult, UploadedObject, WorkStorage};
