//! The `content_uploads` row model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::PREVIEW_MAX_CHARS;

/// One row per ingested object.
///
/// Rows are created exclusively by the ingestion stage and mutated
/// exclusively by the extraction stage (`metadata`, `processed`,
/// `processed_date`); the pipeline never deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ContentUpload {
    pub id: i64,
    pub filename: String,
    /// Byte length reported by storage; NULL when the backend cannot say.
    pub size: Option<i64>,
    pub content_type: Option<String>,
    /// Event timestamp from the triggering notification.
    pub upload_date: DateTime<Utc>,
    pub preview: String,
    /// Structured extraction result; NULL until processed.
    pub metadata: Option<serde_json::Value>,
    pub processed: bool,
    pub processed_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new row. `metadata` starts NULL and `processed`
/// starts false; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewContentUpload {
    pub filename: String,
    pub size: Option<i64>,
    pub content_type: Option<String>,
    pub upload_date: DateTime<Utc>,
    pub preview: String,
}

/// First [`PREVIEW_MAX_CHARS`] characters of the decoded content (fewer if
/// the content is shorter). Character-based, so multi-byte content is never
/// split mid-codepoint.
pub fn preview_of(content: &str) -> String {
    content.chars().take(PREVIEW_MAX_CHARS).collect()
}
