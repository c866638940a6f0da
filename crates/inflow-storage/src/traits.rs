//! Object source abstraction trait
//!
//! This module defines the read contract every storage backend must
//! implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Content and reported metadata for one fetched object.
#[derive(Debug, Clone)]
pub struct FetchedObject {
    /// Decoded textual content.
    pub content: String,
    /// Byte length as reported by the backend; `None` when unknown.
    pub byte_length: Option<i64>,
    /// MIME type as reported by the backend; `None` when unknown.
    pub content_type: Option<String>,
}

/// Read access to external object storage.
///
/// Keys are the *decoded* form (notification keys are decoded before any
/// backend sees them).
#[async_trait]
pub trait ObjectSource: Send + Sync {
    /// Fetch an object's content and reported metadata.
    async fn fetch(&self, container: &str, key: &str) -> StorageResult<FetchedObject>;
}
