#[cfg(feature = "storage-local")]
use crate::LocalObjectSource;
#[cfg(feature = "storage-s3")]
use crate::S3ObjectSource;
use crate::{ObjectSource, StorageBackend, StorageError, StorageResult};
use inflow_core::Config;
use std::sync::Arc;

/// Create an object source based on configuration
pub async fn create_object_source(config: &Config) -> StorageResult<Arc<dyn ObjectSource>> {
    match config.storage_backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let region = config.s3_region.clone().ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint.clone();

            Ok(Arc::new(S3ObjectSource::new(region, endpoint)))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;

            let source = LocalObjectSource::new(base_path).await?;
            Ok(Arc::new(source))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
