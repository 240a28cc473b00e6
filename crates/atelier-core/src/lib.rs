//! Core domain types for the atelier portfolio service.
//!
//! This crate holds the `Work` model and its write shapes, configuration,
//! the error taxonomy, field normalization, the pure image-list
//! reconciliation used by the work service, and the public catalog view
//! logic (filtering, pagination, modal browsing, featured picks).

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod gallery;
pub mod models;
pub mod storage_types;
pub mod validation;

pub use config::Config;
pub use error::{AppError, LogLevel};
pub use storage_types::StorageBackend;
