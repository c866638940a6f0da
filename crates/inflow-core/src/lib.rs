//! Core domain types for the inflow pipeline.
//!
//! This crate holds the shared vocabulary of the two pipeline stages:
//! the `ContentUpload` row model, object notifications, derived metadata,
//! the error taxonomy, and process configuration. It deliberately has no
//! I/O of its own; storage and persistence live in their own crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

pub use config::Config;
pub use error::{PipelineError, PipelineResult};
pub use storage_types::StorageBackend;
