//! Capability traits consumed by the analysis core.
//!
//! Ingestion and persistence are external collaborators: the core only
//! sees these seams, never a concrete PDF reader or database.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::IngestError;
use crate::types::{ClauseType, ClauseValue, Contradiction, ParsedDocument};

/// Opaque `extract_text(path) -> text` capability.
pub trait TextSource {
    fn extract_text(&self, path: &Path) -> Result<String, IngestError>;
}

impl<F> TextSource for F
where
    F: Fn(&Path) -> Result<String, IngestError>,
{
    fn extract_text(&self, path: &Path) -> Result<String, IngestError> {
        self(path)
    }
}

/// Persistence capability. The core treats writes as fire-and-forget
/// side effects; a store failure is logged, never fatal.
pub trait DocumentStore {
    fn store_document(
        &mut self,
        filename: &str,
        file_path: &str,
        raw_text: &str,
        clauses: &BTreeMap<ClauseType, ClauseValue>,
    ) -> anyhow::Result<i64>;

    fn store_contradiction(&mut self, contradiction: &Contradiction) -> anyhow::Result<i64>;

    fn list_documents(&self) -> anyhow::Result<Vec<ParsedDocument>>;

    fn list_contradictions(&self) -> anyhow::Result<Vec<Contradiction>>;

    fn delete_document(&mut self, doc_id: i64) -> anyhow::Result<bool>;
}
