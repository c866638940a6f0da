//! The two pipeline stages.
//!
//! Ingestion turns object-creation notifications into unprocessed
//! `content_uploads` rows; extraction drains bounded batches of those rows
//! through a content-type-keyed strategy table. Both stages process their
//! batch strictly sequentially and fail fast: the first error aborts the
//! remainder of the batch and propagates, while completed items stay put.

pub mod extract;
pub mod extractors;
pub mod ingest;

#[cfg(test)]
pub(crate) mod testing;

pub use extract::{ExtractReport, ExtractStage};
pub use extractors::{Extractor, ExtractorRegistry, TextExtractor};
pub use ingest::{IngestReport, IngestStage};
