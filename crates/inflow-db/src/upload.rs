//! Repository for the `content_uploads` table.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use std::sync::Arc;

use inflow_core::models::{ContentUpload, NewContentUpload};
use inflow_core::{PipelineError, PipelineResult};

use crate::connection::ConnectionCache;

/// Persistence seam for the pipeline stages.
///
/// The concrete repository runs against Postgres; tests exercise the stages
/// against in-memory implementations of this trait.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Insert one row. `processed` defaults false, `metadata` defaults NULL.
    async fn insert(&self, upload: NewContentUpload) -> PipelineResult<ContentUpload>;

    /// Select up to `limit` unprocessed rows in the store's natural scan
    /// order (no explicit ordering is imposed).
    async fn list_unprocessed(&self, limit: i64) -> PipelineResult<Vec<ContentUpload>>;

    /// Attach metadata and flip the row to processed with the current
    /// timestamp.
    async fn mark_processed(&self, id: i64, metadata: serde_json::Value) -> PipelineResult<()>;
}

/// Classify an insert/update failure: connectivity-class faults map to
/// `Connection` (retry-worthy, pool may need re-establishing), anything
/// else is a `Write` (constraint violation, malformed value).
fn classify_write_error(err: sqlx::Error) -> PipelineError {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            PipelineError::connection(err)
        }
        other => PipelineError::write(other),
    }
}

/// Repository for `content_uploads`.
///
/// Holds the connection cache rather than a pool: each operation acquires
/// the shared pool lazily, so the first database touch of an invocation is
/// what establishes (or re-establishes) the connection.
#[derive(Clone)]
pub struct ContentUploadRepository {
    connections: Arc<ConnectionCache>,
}

impl ContentUploadRepository {
    pub fn new(connections: Arc<ConnectionCache>) -> Self {
        Self { connections }
    }

    async fn pool(&self) -> PipelineResult<PgPool> {
        self.connections.acquire().await
    }
}

#[async_trait]
impl UploadStore for ContentUploadRepository {
    #[tracing::instrument(
        skip(self, upload),
        fields(db.table = "content_uploads", filename = %upload.filename)
    )]
    async fn insert(&self, upload: NewContentUpload) -> PipelineResult<ContentUpload> {
        let pool = self.pool().await?;

        let row: ContentUpload = sqlx::query_as::<Postgres, ContentUpload>(
            r#"
            INSERT INTO content_uploads (filename, size, content_type, upload_date, preview)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, filename, size, content_type, upload_date, preview,
                      metadata, processed, processed_date, created_at
            "#,
        )
        .bind(&upload.filename)
        .bind(upload.size)
        .bind(&upload.content_type)
        .bind(upload.upload_date)
        .bind(&upload.preview)
        .fetch_one(&pool)
        .await
        .map_err(classify_write_error)?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "content_uploads"))]
    async fn list_unprocessed(&self, limit: i64) -> PipelineResult<Vec<ContentUpload>> {
        let pool = self.pool().await?;

        sqlx::query_as::<Postgres, ContentUpload>(
            r#"
            SELECT id, filename, size, content_type, upload_date, preview,
                   metadata, processed, processed_date, created_at
            FROM content_uploads
            WHERE processed = FALSE
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&pool)
        .await
        .map_err(PipelineError::connection)
    }

    #[tracing::instrument(skip(self, metadata), fields(db.table = "content_uploads", id = id))]
    async fn mark_processed(&self, id: i64, metadata: serde_json::Value) -> PipelineResult<()> {
        let pool = self.pool().await?;

        sqlx::query(
            r#"
            UPDATE content_uploads
            SET metadata = $1, processed = TRUE, processed_date = NOW()
            WHERE id = $2
            "#,
        )
        .bind(metadata)
        .bind(id)
        .execute(&pool)
        .await
        .map_err(classify_write_error)?;

        Ok(())
    }
}
