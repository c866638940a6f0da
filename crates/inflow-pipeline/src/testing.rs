//! In-memory fakes for exercising the stages without external services.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use inflow_core::models::{ContentUpload, NewContentUpload, ObjectNotification};
use inflow_core::{PipelineError, PipelineResult};
use inflow_db::UploadStore;
use inflow_storage::{FetchedObject, ObjectSource, StorageError, StorageResult};

pub(crate) fn notification(container: &str, key: &str) -> ObjectNotification {
    ObjectNotification {
        container: container.to_string(),
        key: key.to_string(),
        event_timestamp: Utc::now(),
    }
}

#[derive(Default)]
struct MemoryStoreInner {
    rows: Vec<ContentUpload>,
    next_id: i64,
    fail_next_insert: bool,
    fail_update_for: Option<i64>,
    update_calls: usize,
}

/// In-memory [`UploadStore`] with hooks for injecting failures.
#[derive(Clone, Default)]
pub(crate) struct MemoryUploadStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

impl MemoryUploadStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert an unprocessed row directly, bypassing the ingestion path.
    pub(crate) fn seed(
        &self,
        filename: &str,
        content_type: Option<&str>,
        preview: &str,
    ) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.push(ContentUpload {
            id,
            filename: filename.to_string(),
            size: Some(preview.len() as i64),
            content_type: content_type.map(String::from),
            upload_date: Utc::now(),
            preview: preview.to_string(),
            metadata: None,
            processed: false,
            processed_date: None,
            created_at: Utc::now(),
        });
        id
    }

    pub(crate) fn rows(&self) -> Vec<ContentUpload> {
        self.inner.lock().unwrap().rows.clone()
    }

    pub(crate) fn row(&self, id: i64) -> Option<ContentUpload> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|row| row.id == id)
            .cloned()
    }

    pub(crate) fn fail_next_insert(&self) {
        self.inner.lock().unwrap().fail_next_insert = true;
    }

    pub(crate) fn fail_update_for(&self, id: i64) {
        self.inner.lock().unwrap().fail_update_for = Some(id);
    }

    pub(crate) fn update_calls(&self) -> usize {
        self.inner.lock().unwrap().update_calls
    }
}

#[async_trait]
impl UploadStore for MemoryUploadStore {
    async fn insert(&self, upload: NewContentUpload) -> PipelineResult<ContentUpload> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_next_insert {
            inner.fail_next_insert = false;
            return Err(PipelineError::write("constraint violation"));
        }

        inner.next_id += 1;
        let row = ContentUpload {
            id: inner.next_id,
            filename: upload.filename,
            size: upload.size,
            content_type: upload.content_type,
            upload_date: upload.upload_date,
            preview: upload.preview,
            metadata: None,
            processed: false,
            processed_date: None,
            created_at: Utc::now(),
        };
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn list_unprocessed(&self, limit: i64) -> PipelineResult<Vec<ContentUpload>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rows
            .iter()
            .filter(|row| !row.processed)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn mark_processed(&self, id: i64, metadata: serde_json::Value) -> PipelineResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.update_calls += 1;

        if inner.fail_update_for == Some(id) {
            return Err(PipelineError::write("malformed value"));
        }

        let row = inner
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| PipelineError::write(format!("no row with id {id}")))?;
        row.metadata = Some(metadata);
        row.processed = true;
        row.processed_date = Some(Utc::now());
        Ok(())
    }
}

/// In-memory [`ObjectSource`]; keys not present report as not found.
#[derive(Default)]
pub(crate) struct MemoryObjectSource {
    objects: Mutex<HashMap<(String, String), FetchedObject>>,
    fetches: Mutex<usize>,
}

impl MemoryObjectSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn put(
        &self,
        container: &str,
        key: &str,
        content: &str,
        content_type: Option<&str>,
    ) {
        self.objects.lock().unwrap().insert(
            (container.to_string(), key.to_string()),
            FetchedObject {
                content: content.to_string(),
                byte_length: Some(content.len() as i64),
                content_type: content_type.map(String::from),
            },
        );
    }

    pub(crate) fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl ObjectSource for MemoryObjectSource {
    async fn fetch(&self, container: &str, key: &str) -> StorageResult<FetchedObject> {
        *self.fetches.lock().unwrap() += 1;
        self.objects
            .lock()
            .unwrap()
            .get(&(container.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("{}/{}", container, key)))
    }
}
