//! Ingestion stage: object notifications become unprocessed rows.

use std::sync::Arc;

use serde::Serialize;

use inflow_core::models::{preview_of, NewContentUpload, ObjectNotification};
use inflow_core::{PipelineError, PipelineResult};
use inflow_db::UploadStore;
use inflow_storage::ObjectSource;

/// Summary returned by a successful ingestion invocation.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// Notifications fully recorded in this invocation.
    pub ingested: usize,
}

pub struct IngestStage {
    store: Arc<dyn UploadStore>,
    objects: Arc<dyn ObjectSource>,
}

impl IngestStage {
    pub fn new(store: Arc<dyn UploadStore>, objects: Arc<dyn ObjectSource>) -> Self {
        IngestStage { store, objects }
    }

    /// Record one row per notification, strictly in order.
    ///
    /// Fail-fast: the first fetch or insert error aborts the remaining
    /// notifications and propagates. Rows inserted before the failure stay
    /// in place; nothing is rolled back.
    #[tracing::instrument(skip(self, notifications), fields(batch_size = notifications.len()))]
    pub async fn ingest(
        &self,
        notifications: &[ObjectNotification],
    ) -> PipelineResult<IngestReport> {
        let mut ingested = 0;

        for notification in notifications {
            let key = notification.decoded_key();
            tracing::info!(
                container = %notification.container,
                key = %key,
                "Ingesting object"
            );

            let object = self
                .objects
                .fetch(&notification.container, &key)
                .await
                .map_err(|e| PipelineError::fetch(&key, e))?;

            let upload = NewContentUpload {
                filename: notification.filename(),
                size: object.byte_length,
                content_type: object.content_type,
                upload_date: notification.event_timestamp,
                preview: preview_of(&object.content),
            };

            let row = self.store.insert(upload).await?;
            tracing::info!(id = row.id, filename = %row.filename, "Object recorded");
            ingested += 1;
        }

        Ok(IngestReport { ingested })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{notification, MemoryObjectSource, MemoryUploadStore};

    fn stage(store: &Arc<MemoryUploadStore>, objects: &Arc<MemoryObjectSource>) -> IngestStage {
        IngestStage::new(store.clone(), objects.clone())
    }

    #[tokio::test]
    async fn records_one_row_per_notification_in_order() {
        let store = Arc::new(MemoryUploadStore::new());
        let objects = Arc::new(MemoryObjectSource::new());
        objects.put("uploads", "first.txt", "one two", Some("text/plain"));
        objects.put("uploads", "second.txt", "three", Some("text/plain"));

        let report = stage(&store, &objects)
            .ingest(&[
                notification("uploads", "first.txt"),
                notification("uploads", "second.txt"),
            ])
            .await
            .unwrap();

        assert_eq!(report.ingested, 2);
        let rows = store.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].filename, "first.txt");
        assert_eq!(rows[1].filename, "second.txt");
    }

    #[tokio::test]
    async fn inserted_rows_start_unprocessed_with_null_metadata() {
        let store = Arc::new(MemoryUploadStore::new());
        let objects = Arc::new(MemoryObjectSource::new());
        objects.put("uploads", "a.txt", "content", Some("text/plain"));

        stage(&store, &objects)
            .ingest(&[notification("uploads", "a.txt")])
            .await
            .unwrap();

        let row = &store.rows()[0];
        assert!(!row.processed);
        assert!(row.metadata.is_none());
        assert!(row.processed_date.is_none());
        assert_eq!(row.size, Some(7));
        assert_eq!(row.content_type.as_deref(), Some("text/plain"));
    }

    #[tokio::test]
    async fn preview_is_the_first_thousand_characters() {
        let store = Arc::new(MemoryUploadStore::new());
        let objects = Arc::new(MemoryObjectSource::new());
        let content = "z".repeat(4096);
        objects.put("uploads", "big.txt", &content, Some("text/plain"));

        stage(&store, &objects)
            .ingest(&[notification("uploads", "big.txt")])
            .await
            .unwrap();

        let row = &store.rows()[0];
        assert_eq!(row.preview, content[..1000]);
        assert!(!row.processed);
    }

    #[tokio::test]
    async fn keys_are_decoded_before_fetch_and_filename() {
        let store = Arc::new(MemoryUploadStore::new());
        let objects = Arc::new(MemoryObjectSource::new());
        // The stored object lives under the decoded key.
        objects.put("uploads", "folder/a b.txt", "hi", Some("text/plain"));

        stage(&store, &objects)
            .ingest(&[notification("uploads", "folder/a+b.txt")])
            .await
            .unwrap();

        assert_eq!(store.rows()[0].filename, "a b.txt");
    }

    #[tokio::test]
    async fn fetch_failure_aborts_the_rest_of_the_batch() {
        let store = Arc::new(MemoryUploadStore::new());
        let objects = Arc::new(MemoryObjectSource::new());
        objects.put("uploads", "1.txt", "one", Some("text/plain"));
        objects.put("uploads", "2.txt", "two", Some("text/plain"));
        // 3.txt is missing; 4.txt and 5.txt exist but must never be reached.
        objects.put("uploads", "4.txt", "four", Some("text/plain"));
        objects.put("uploads", "5.txt", "five", Some("text/plain"));

        let err = stage(&store, &objects)
            .ingest(&[
                notification("uploads", "1.txt"),
                notification("uploads", "2.txt"),
                notification("uploads", "3.txt"),
                notification("uploads", "4.txt"),
                notification("uploads", "5.txt"),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Fetch { .. }));
        // Partial progress persists: rows 1-2 exist, 4-5 were never attempted.
        let rows = store.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].filename, "1.txt");
        assert_eq!(rows[1].filename, "2.txt");
        assert_eq!(objects.fetch_count(), 3);
    }

    #[tokio::test]
    async fn insert_failure_propagates_as_write_error() {
        let store = Arc::new(MemoryUploadStore::new());
        store.fail_next_insert();
        let objects = Arc::new(MemoryObjectSource::new());
        objects.put("uploads", "a.txt", "content", Some("text/plain"));

        let err = stage(&store, &objects)
            .ingest(&[notification("uploads", "a.txt")])
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Write(_)));
        assert!(store.rows().is_empty());
    }
}
