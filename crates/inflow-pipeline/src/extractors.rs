//! Extraction strategies keyed by content type.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value as JsonValue};

use inflow_core::models::TextMetadata;

/// A strategy that derives structured metadata from a stored preview.
pub trait Extractor: Send + Sync {
    fn extract(&self, preview: &str) -> JsonValue;
}

/// Word-count and reading-time extraction for textual content.
pub struct TextExtractor;

impl Extractor for TextExtractor {
    fn extract(&self, preview: &str) -> JsonValue {
        serde_json::to_value(TextMetadata::from_preview(preview)).unwrap_or_else(|_| json!({}))
    }
}

/// Table of extraction strategies keyed by content type.
///
/// Rows whose content type has no entry (or no content type at all) receive
/// an empty metadata object; the batch loop marks them processed either
/// way. New content types are supported by registering a strategy, without
/// touching the loop.
pub struct ExtractorRegistry {
    extractors: HashMap<String, Arc<dyn Extractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ExtractorRegistry {
            extractors: HashMap::new(),
        }
    }

    /// Registry with the built-in strategies (plain text and markdown).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let text: Arc<dyn Extractor> = Arc::new(TextExtractor);
        registry.register("text/plain", text.clone());
        registry.register("text/markdown", text);
        registry
    }

    /// Register a strategy for a content type.
    pub fn register(&mut self, content_type: impl Into<String>, extractor: Arc<dyn Extractor>) {
        self.extractors.insert(content_type.into(), extractor);
    }

    /// Metadata for a row: the registered strategy's output when one exists
    /// for the content type, an empty object otherwise.
    pub fn extract(&self, content_type: Option<&str>, preview: &str) -> JsonValue {
        content_type
            .and_then(|ct| self.extractors.get(ct))
            .map(|extractor| extractor.extract(preview))
            .unwrap_or_else(|| json!({}))
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
