use crate::traits::{FetchedObject, ObjectSource, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Local filesystem implementation, for development and tests.
///
/// Objects live at `{base_path}/{container}/{key}`. The content type is
/// guessed from the key's extension since the filesystem reports none.
#[derive(Clone)]
pub struct LocalObjectSource {
    base_path: PathBuf,
}

impl LocalObjectSource {
    /// Create a new LocalObjectSource rooted at `base_path`.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalObjectSource { base_path })
    }

    /// Convert container + key to a filesystem path, rejecting traversal
    /// sequences that could escape the base directory.
    fn object_path(&self, container: &str, key: &str) -> StorageResult<PathBuf> {
        if container.is_empty() || container.contains("..") || container.contains('/') {
            return Err(StorageError::InvalidKey(format!(
                "Invalid container name: {}",
                container
            )));
        }
        if key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Object key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(container).join(key))
    }

    fn guess_content_type(key: &str) -> Option<String> {
        let extension = key.rsplit('.').next()?.to_lowercase();
        let content_type = match extension.as_str() {
            "txt" => "text/plain",
            "md" | "markdown" => "text/markdown",
            "html" | "htm" => "text/html",
            "json" => "application/json",
            "csv" => "text/csv",
            _ => return None,
        };
        Some(content_type.to_string())
    }
}

#[async_trait]
impl ObjectSource for LocalObjectSource {
    async fn fetch(&self, container: &str, key: &str) -> StorageResult<FetchedObject> {
        let path = self.object_path(container, key)?;

        let bytes = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(format!("{}/{}", container, key))
            } else {
                StorageError::FetchFailed(format!("{}: {}", path.display(), e))
            }
        })?;

        let byte_length = i64::try_from(bytes.len()).ok();
        let content = String::from_utf8_lossy(&bytes).into_owned();

        tracing::debug!(
            container = %container,
            key = %key,
            size_bytes = bytes.len() as u64,
            "Local fetch successful"
        );

        Ok(FetchedObject {
            content,
            byte_length,
            content_type: Self::guess_content_type(key),
        })
    }
}
