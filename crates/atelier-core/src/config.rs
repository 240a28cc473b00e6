//! Configuration module
//!
//! Environment-backed configuration with fail-fast validation: a missing
//! required value is an explicit startup error, never silent misbehavior.

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context};

use crate::storage_types::StorageBackend;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub max_upload_bytes: usize,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub storage_bucket: String,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub storage_public_url_base: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Admin credential pair
    pub admin_user: String,
    pub admin_pass: String,
}

/// Fetch a required environment variable; absence is an explicit error.
fn require(name: &str) -> Result<String, anyhow::Error> {
    env::var(name).with_context(|| format!("Missing required environment variable: {}", name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: FromStr>(name: &str, default: T) -> Result<T, anyhow::Error> {
    match optional(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("Invalid value for {}: {}", name, raw)),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Best-effort .env load for local development
        dotenvy::dotenv().ok();

        let storage_backend = match optional("STORAGE_BACKEND") {
            Some(raw) => StorageBackend::from_str(&raw).map_err(|e| anyhow::anyhow!(e))?,
            None => StorageBackend::S3,
        };

        let cors_origins = optional("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec!["*".to_string()]);

        let config = Config {
            server_port: parse_or("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            environment: optional("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            cors_origins,
            database_url: require("DATABASE_URL")?,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            db_timeout_seconds: parse_or("DB_TIMEOUT_SECONDS", DEFAULT_CONNECTION_TIMEOUT_SECS)?,
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            storage_backend,
            storage_bucket: require("STORAGE_BUCKET")?,
            s3_region: optional("S3_REGION"),
            s3_endpoint: optional("S3_ENDPOINT"),
            storage_public_url_base: optional("STORAGE_PUBLIC_URL_BASE"),
            local_storage_path: optional("LOCAL_STORAGE_PATH"),
            local_storage_base_url: optional("LOCAL_STORAGE_BASE_URL"),
            admin_user: require("ADMIN_USER")?,
            admin_pass: require("ADMIN_PASS")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Cross-field validation beyond per-variable presence.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.admin_user.is_empty() || self.admin_pass.is_empty() {
            bail!("ADMIN_USER and ADMIN_PASS must be non-empty");
        }
        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_region.is_none() {
                    bail!("S3_REGION must be set when STORAGE_BACKEND=s3");
                }
                if self.storage_public_url_base.is_none() {
                    bail!("STORAGE_PUBLIC_URL_BASE must be set when STORAGE_BACKEND=s3");
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    bail!("LOCAL_STORAGE_PATH must be set when STORAGE_BACKEND=local");
                }
                if self.local_storage_base_url.is_none() {
                    bail!("LOCAL_STORAGE_BASE_URL must be set when STORAGE_BACKEND=local");
                }
            }
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
