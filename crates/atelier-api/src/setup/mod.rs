//! Application setup and initialization
//!
//! All initialization logic lives here, extracted from main.rs for better
//! organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};

use atelier_core::Config;
use atelier_db::{PgWorksRepository, WorksRepository};

use crate::auth::{BasicAuthenticator, DynAuthenticator};
use crate::services::WorkService;
use crate::state::AppState;

/// Initialize tracing with the standard env-filter setup.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;
    tracing::info!("Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup storage
    let storage = storage::setup_storage(&config).await?;

    // Wire repositories and services
    let works: Arc<dyn WorksRepository> = Arc::new(PgWorksRepository::new(pool));
    let service = WorkService::new(works, storage);
    let authenticator: DynAuthenticator = Arc::new(BasicAuthenticator::new(
        config.admin_user.clone(),
        config.admin_pass.clone(),
    ));

    let state = Arc::new(AppState {
        config: config.clone(),
        service,
        authenticator,
    });

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
