//! Shared database connection handling.
//!
//! Each worker process holds exactly one connection pool, established
//! lazily on the first acquisition and reused across invocations. When
//! establishment fails the slot is left empty, so the *next* invocation
//! attempts a fresh connection; the failing invocation itself does not
//! retry.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::Mutex;

use inflow_core::{PipelineError, PipelineResult};

use crate::credentials::CredentialResolver;

/// Lazily-initialized slot guarded by an async mutex.
///
/// The lock is held across initialization, which gives single-flight
/// semantics: two first-callers racing within one process establish one
/// value, not two. An initializer error leaves the slot empty.
pub(crate) struct CachedSlot<T: Clone> {
    slot: Mutex<Option<T>>,
}

impl<T: Clone> CachedSlot<T> {
    pub(crate) fn new() -> Self {
        CachedSlot {
            slot: Mutex::new(None),
        }
    }

    pub(crate) async fn get_or_try_init<F, Fut, E>(&self, init: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut guard = self.slot.lock().await;
        if let Some(value) = guard.as_ref() {
            return Ok(value.clone());
        }

        let value = init().await?;
        *guard = Some(value.clone());
        Ok(value)
    }

    pub(crate) async fn clear(&self) {
        *self.slot.lock().await = None;
    }
}

/// Process-wide database connection cache.
///
/// Connection lifetime is bound to the worker process; there is no
/// teardown API. The external runtime decides when a process is recycled.
pub struct ConnectionCache {
    resolver: Arc<dyn CredentialResolver>,
    max_connections: u32,
    acquire_timeout: Duration,
    pool: CachedSlot<PgPool>,
}

impl ConnectionCache {
    pub fn new(
        resolver: Arc<dyn CredentialResolver>,
        max_connections: u32,
        acquire_timeout_secs: u64,
    ) -> Self {
        ConnectionCache {
            resolver,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            pool: CachedSlot::new(),
        }
    }

    /// Return the cached pool, establishing it on first use.
    ///
    /// Resolver failures surface as [`PipelineError::Configuration`];
    /// connect failures as [`PipelineError::Connection`]. Either way the
    /// slot stays empty and the error propagates to the caller.
    #[tracing::instrument(skip(self))]
    pub async fn acquire(&self) -> PipelineResult<PgPool> {
        self.pool
            .get_or_try_init(|| async {
                let url = self.resolver.resolve().await?;

                let pool = PgPoolOptions::new()
                    .max_connections(self.max_connections)
                    .acquire_timeout(self.acquire_timeout)
                    .connect(&url)
                    .await
                    .map_err(|e| {
                        tracing::error!(error = %e, "Failed to establish database connection");
                        PipelineError::connection(e)
                    })?;

                tracing::debug!(
                    max_connections = self.max_connections,
                    "Database connection pool established"
                );
                Ok(pool)
            })
            .await
    }

    /// Drop the cached pool so the next [`acquire`](Self::acquire)
    /// reconnects from scratch.
    pub async fn invalidate(&self) {
        self.pool.clear().await;
    }
}
