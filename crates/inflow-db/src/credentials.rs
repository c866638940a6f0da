//! Connection-string resolution.
//!
//! The pipeline never reads the database URL directly from configuration;
//! it asks a resolver, which looks the value up by a configured identifier
//! and caches it for the life of the process.

use async_trait::async_trait;
use tokio::sync::OnceCell;

use inflow_core::{PipelineError, PipelineResult};

/// Resolves the database connection string from a configured identifier.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    /// Return the connection string, caching it for the process lifetime.
    async fn resolve(&self) -> PipelineResult<String>;
}

/// Resolver backed by a process environment variable.
///
/// The configured identifier is the variable *name*; the value is read once
/// and memoized. A missing variable is a configuration error, not a
/// transient one.
pub struct EnvCredentialResolver {
    var_name: String,
    cached: OnceCell<String>,
}

impl EnvCredentialResolver {
    pub fn new(var_name: impl Into<String>) -> Self {
        EnvCredentialResolver {
            var_name: var_name.into(),
            cached: OnceCell::new(),
        }
    }
}

#[async_trait]
impl CredentialResolver for EnvCredentialResolver {
    async fn resolve(&self) -> PipelineResult<String> {
        self.cached
            .get_or_try_init(|| async {
                std::env::var(&self.var_name).map_err(|_| {
                    PipelineError::configuration(format!(
                        "{} environment variable is not set",
                        self.var_name
                    ))
                })
            })
            .await
            .map(|url| url.clone())
    }
}
