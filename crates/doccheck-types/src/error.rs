//! Error taxonomy for document ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced per document by a [`crate::capabilities::TextSource`].
///
/// These never abort a batch: the pipeline marks the affected document
/// `failed` and continues with the rest.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to extract text from {path}: {reason}")]
    Extraction { path: PathBuf, reason: String },
}
