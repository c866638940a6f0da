//! Read-side object storage for the ingestion stage.
//!
//! The pipeline only ever *reads* from external storage: given a container
//! and a decoded key, it needs the object's textual content plus the byte
//! length and content type the backend reports. The [`ObjectSource`] trait
//! captures exactly that, with an S3 backend for production and a local
//! filesystem backend for development and tests.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

pub use factory::create_object_source;
pub use inflow_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalObjectSource;
#[cfg(feature = "storage-s3")]
pub use s3::S3ObjectSource;
pub use traits::{FetchedObject, ObjectSource, StorageError, StorageResult};
