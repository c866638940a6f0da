//! Derived metadata for textual content.

use serde::{Deserialize, Serialize};

use crate::constants::{TEXT_LANGUAGE_TAG, WORDS_PER_MINUTE};

/// Extraction result for `text/plain` and `text/markdown` rows.
///
/// Serialized into the row's `metadata` column; the field names are part of
/// the stored format and consumed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMetadata {
    pub word_count: u64,
    /// Minutes, rounded up, at [`WORDS_PER_MINUTE`].
    pub reading_time: u64,
    pub content_type: String,
    pub language: String,
}

impl TextMetadata {
    pub fn from_preview(preview: &str) -> Self {
        let word_count = preview.split_whitespace().count() as u64;
        let reading_time = word_count.div_ceil(WORDS_PER_MINUTE);
        TextMetadata {
            word_count,
            reading_time,
            content_type: "text".to_string(),
            language: TEXT_LANGUAGE_TAG.to_string(),
        }
    }
}
