//! Shared pipeline constants.

/// Maximum number of characters captured from an object's decoded content
/// at ingestion time. Extraction works exclusively on this preview and never
/// refetches the original object.
pub const PREVIEW_MAX_CHARS: usize = 1000;

/// Upper bound on rows selected by one extraction invocation.
pub const EXTRACT_BATCH_LIMIT: i64 = 10;

/// Reading speed used to derive reading time from a word count.
pub const WORDS_PER_MINUTE: u64 = 200;

/// Language tag attached to textual metadata.
pub const TEXT_LANGUAGE_TAG: &str = "en";
