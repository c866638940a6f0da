//! Persistence layer for the inflow pipeline.
//!
//! Holds the credential resolver, the process-wide connection cache, and
//! the `content_uploads` repository. Stages depend on the [`UploadStore`]
//! trait rather than the concrete repository so they can be exercised
//! against in-memory fakes.

pub mod connection;
pub mod credentials;
pub mod upload;

pub use connection::ConnectionCache;
pub use credentials::{CredentialResolver, EnvCredentialResolver};
pub use upload::{ContentUploadRepository, UploadStore};
