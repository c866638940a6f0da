use crate::traits::{FetchedObject, ObjectSource, StorageError, StorageResult};
use async_trait::async_trait;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{Attribute, Error as ObjectStoreError, ObjectStoreExt, Result as ObjectResult};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// S3 read implementation
///
/// Notifications carry the container per event, while an `AmazonS3` handle
/// is bound to one bucket, so one handle is built per container on first
/// use and reused for the life of the process.
pub struct S3ObjectSource {
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    stores: RwLock<HashMap<String, AmazonS3>>,
}

impl S3ObjectSource {
    /// Create a new S3ObjectSource.
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(region: String, endpoint_url: Option<String>) -> Self {
        S3ObjectSource {
            region,
            endpoint_url,
            stores: RwLock::new(HashMap::new()),
        }
    }

    async fn store_for(&self, container: &str) -> StorageResult<AmazonS3> {
        if let Some(store) = self.stores.read().await.get(container) {
            return Ok(store.clone());
        }

        // Build AmazonS3 object store from environment and explicit settings.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(self.region.clone())
            .with_bucket_name(container.to_string());

        if let Some(ref endpoint) = self.endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        self.stores
            .write()
            .await
            .insert(container.to_string(), store.clone());
        Ok(store)
    }
}

#[async_trait]
impl ObjectSource for S3ObjectSource {
    async fn fetch(&self, container: &str, key: &str) -> StorageResult<FetchedObject> {
        let start = std::time::Instant::now();
        let store = self.store_for(container).await?;
        let location = Path::from(key.to_string());

        let result: ObjectResult<_> = store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(key.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    container = %container,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 fetch failed"
                );
                StorageError::FetchFailed(other.to_string())
            }
        })?;

        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|value| value.to_string());
        let byte_length = i64::try_from(result.meta.size).ok();

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::FetchFailed(e.to_string()))?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        tracing::info!(
            container = %container,
            key = %key,
            size_bytes = bytes.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 fetch successful"
        );

        Ok(FetchedObject {
            content,
            byte_length,
            content_type,
        })
    }
}
