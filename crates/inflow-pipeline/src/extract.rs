//! Extraction stage: unprocessed rows get their derived metadata.

use std::sync::Arc;

use serde::Serialize;

use inflow_core::constants::EXTRACT_BATCH_LIMIT;
use inflow_core::PipelineResult;
use inflow_db::UploadStore;

use crate::extractors::ExtractorRegistry;

/// Summary returned by a successful extraction invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractReport {
    /// Rows updated in this invocation.
    pub processed: usize,
}

pub struct ExtractStage {
    store: Arc<dyn UploadStore>,
    registry: ExtractorRegistry,
}

impl ExtractStage {
    /// Stage with the built-in extraction strategies.
    pub fn new(store: Arc<dyn UploadStore>) -> Self {
        Self::with_registry(store, ExtractorRegistry::with_defaults())
    }

    pub fn with_registry(store: Arc<dyn UploadStore>, registry: ExtractorRegistry) -> Self {
        ExtractStage { store, registry }
    }

    /// Process one bounded batch of unprocessed rows, sequentially.
    ///
    /// Every selected row is updated — rows without a registered strategy
    /// get an empty metadata object — so no row is ever re-selected once a
    /// batch has touched it. Fail-fast: an update error aborts the rest of
    /// the batch, and rows updated earlier stay processed. Because the
    /// selection predicate excludes processed rows, re-running the stage
    /// with no new rows performs zero writes.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self) -> PipelineResult<ExtractReport> {
        let rows = self.store.list_unprocessed(EXTRACT_BATCH_LIMIT).await?;
        tracing::info!(selected = rows.len(), "Extraction batch selected");

        let mut processed = 0;
        for row in rows {
            let metadata = self.registry.extract(row.content_type.as_deref(), &row.preview);
            self.store.mark_processed(row.id, metadata).await?;
            tracing::info!(id = row.id, filename = %row.filename, "Metadata extracted");
            processed += 1;
        }

        Ok(ExtractReport { processed })
    }
}
