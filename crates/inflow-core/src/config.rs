//! Configuration module
//!
//! Process configuration is read once from the environment at startup.
//! The database connection string itself is *not* read here: configuration
//! only names the identifier handed to the credential resolver, which
//! resolves (and caches) the actual value on first use.

use std::env;

use crate::error::{PipelineError, PipelineResult};
use crate::storage_types::StorageBackend;

const DB_MAX_CONNECTIONS: u32 = 5;
const DB_TIMEOUT_SECS: u64 = 30;
const EXTRACT_POLL_INTERVAL_SECS: u64 = 60;
const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Pipeline process configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    /// Name of the environment variable the credential resolver reads the
    /// connection string from.
    pub database_url_var: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub storage_backend: StorageBackend,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    /// Interval between extraction batches when running the poll loop.
    pub extract_poll_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> PipelineResult<Self> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::S3,
        };

        let config = Config {
            environment,
            database_url_var: env::var("DATABASE_URL_VAR")
                .unwrap_or_else(|_| DATABASE_URL_VAR.to_string()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DB_MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(DB_MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DB_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DB_TIMEOUT_SECS),
            storage_backend,
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .ok()
                .filter(|s| !s.is_empty()),
            extract_poll_interval_secs: env::var("EXTRACT_POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| EXTRACT_POLL_INTERVAL_SECS.to_string())
                .parse()
                .unwrap_or(EXTRACT_POLL_INTERVAL_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if self.database_url_var.trim().is_empty() {
            return Err(PipelineError::configuration(
                "DATABASE_URL_VAR cannot be empty",
            ));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_region.is_none() {
                    return Err(PipelineError::configuration(
                        "S3_REGION or AWS_REGION must be set when using the S3 storage backend",
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(PipelineError::configuration(
                        "LOCAL_STORAGE_PATH must be set when using the local storage backend",
                    ));
                }
            }
        }

        Ok(())
    }
}
