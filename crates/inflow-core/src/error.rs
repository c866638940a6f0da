//! Error types module
//!
//! The pipeline's failure modes are unified under [`PipelineError`]. Every
//! error is fail-fast at the batch level: stages never retry internally, and
//! the external trigger decides what to do with a propagated error. Callers
//! can use [`PipelineError::is_retryable`] to distinguish conditions worth
//! redelivering from terminal misconfiguration.

use std::fmt::Display;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A required identifier for credential resolution is missing or the
    /// process configuration is otherwise unusable. Terminal; redelivery
    /// will not help until the environment is fixed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The database could not be reached or authenticated against. The
    /// connection cache is left empty so the next invocation starts fresh.
    #[error("Database connection error: {0}")]
    Connection(String),

    /// The object store failed to return content for a key. Aborts the
    /// remaining notifications in the current ingestion batch.
    #[error("Object fetch failed for '{key}': {message}")]
    Fetch { key: String, message: String },

    /// An insert or update was rejected by the store. Aborts the remaining
    /// items in the current batch.
    #[error("Database write error: {0}")]
    Write(String),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    pub fn configuration(message: impl Into<String>) -> Self {
        PipelineError::Configuration(message.into())
    }

    pub fn connection(err: impl Display) -> Self {
        PipelineError::Connection(err.to_string())
    }

    pub fn fetch(key: impl Into<String>, err: impl Display) -> Self {
        PipelineError::Fetch {
            key: key.into(),
            message: err.to_string(),
        }
    }

    pub fn write(err: impl Display) -> Self {
        PipelineError::Write(err.to_string())
    }

    /// Machine-readable error code (e.g. for structured logs).
    pub fn error_code(&self) -> &'static str {
        match self {
            PipelineError::Configuration(_) => "CONFIGURATION_ERROR",
            PipelineError::Connection(_) => "CONNECTION_ERROR",
            PipelineError::Fetch { .. } => "FETCH_ERROR",
            PipelineError::Write(_) => "WRITE_ERROR",
        }
    }

    /// Whether redelivering the triggering invocation can succeed.
    ///
    /// Everything except missing configuration is transient from the
    /// trigger's point of view: connections re-establish, object stores and
    /// databases recover.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, PipelineError::Configuration(_))
    }
}
