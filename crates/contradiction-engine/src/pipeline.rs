//! Batch analysis pipeline: ingestion, extraction, detection, report.

use std::path::PathBuf;

use doccheck_types::{
    AnalysisOutcome, AnalysisSummary, DocumentStatus, DocumentStore, ParsedDocument,
    ProcessingStatus, TextSource,
};
use tracing::{info, warn};

use crate::detect::ContradictionDetector;
use crate::extract::ClauseExtractor;
use crate::report::generate_report;
use crate::rules::RuleSet;

/// Pre-extracted input to the pipeline.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub filename: String,
    pub file_path: String,
    pub text: String,
}

enum Ingested {
    Extracted(RawDocument),
    Failed(ParsedDocument),
}

/// Orchestrates one analysis run. Ingestion failures are isolated per
/// document; detection runs only when at least two documents extracted
/// successfully.
pub struct DocChecker {
    extractor: ClauseExtractor,
    detector: ContradictionDetector,
}

impl DocChecker {
    pub fn new() -> Self {
        Self::with_rules(RuleSet::standard())
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            extractor: ClauseExtractor::new(),
            detector: ContradictionDetector::new(rules),
        }
    }

    /// Access the extractor registry, e.g. to register a richer
    /// recognizer ahead of the regex fallback.
    pub fn extractor_mut(&mut self) -> &mut ClauseExtractor {
        &mut self.extractor
    }

    /// Analyze documents on disk through the given text source.
    pub fn analyze_paths(
        &self,
        paths: &[PathBuf],
        source: &dyn TextSource,
        store: Option<&mut dyn DocumentStore>,
    ) -> AnalysisOutcome {
        let batch: Vec<Ingested> = paths
            .iter()
            .map(|path| {
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let file_path = path.display().to_string();

                match source.extract_text(path) {
                    Ok(text) => Ingested::Extracted(RawDocument {
                        filename,
                        file_path,
                        text,
                    }),
                    Err(error) => {
                        warn!(file = %file_path, %error, "text extraction failed");
                        Ingested::Failed(ParsedDocument::failed(
                            filename,
                            file_path,
                            error.to_string(),
                        ))
                    }
                }
            })
            .collect();

        self.run(batch, store)
    }

    /// Analyze pre-extracted document texts.
    pub fn analyze_texts(
        &self,
        documents: Vec<RawDocument>,
        store: Option<&mut dyn DocumentStore>,
    ) -> AnalysisOutcome {
        let batch = documents.into_iter().map(Ingested::Extracted).collect();
        self.run(batch, store)
    }

    fn run(&self, batch: Vec<Ingested>, mut store: Option<&mut dyn DocumentStore>) -> AnalysisOutcome {
        let mut documents = Vec::with_capacity(batch.len());

        for ingested in batch {
            match ingested {
                Ingested::Failed(doc) => documents.push(doc),
                Ingested::Extracted(raw) => {
                    if raw.text.trim().is_empty() {
                        warn!(file = %raw.filename, "document contains no text");
                        documents.push(ParsedDocument::failed(
                            raw.filename,
                            raw.file_path,
                            "document contains no text",
                        ));
                        continue;
                    }

                    let clauses = self.extractor.extract(&raw.text);
                    info!(
                        file = %raw.filename,
                        clauses = clauses.len(),
                        "extracted clauses"
                    );

                    let mut parsed =
                        ParsedDocument::success(raw.filename, raw.file_path, clauses);

                    if let Some(store) = store.as_deref_mut() {
                        match store.store_document(
                            &parsed.filename,
                            &parsed.file_path,
                            &raw.text,
                            &parsed.clauses,
                        ) {
                            Ok(doc_id) => parsed.doc_id = Some(doc_id),
                            Err(error) => {
                                warn!(file = %parsed.filename, %error, "failed to store document")
                            }
                        }
                    }

                    documents.push(parsed);
                }
            }
        }

        let successful: Vec<ParsedDocument> = documents
            .iter()
            .filter(|doc| doc.status == DocumentStatus::Success)
            .cloned()
            .collect();

        let (contradictions, processing_status) = if successful.len() >= 2 {
            let contradictions = self.detector.detect(&successful);
            info!(count = contradictions.len(), "contradiction detection complete");

            if let Some(store) = store.as_deref_mut() {
                for contradiction in &contradictions {
                    if let Err(error) = store.store_contradiction(contradiction) {
                        warn!(%error, "failed to store contradiction");
                    }
                }
            }

            (contradictions, ProcessingStatus::Success)
        } else {
            info!("need at least 2 successfully extracted documents to detect contradictions");
            (Vec::new(), ProcessingStatus::InsufficientDocuments)
        };

        let report = generate_report(&contradictions);
        let summary = AnalysisSummary {
            total_documents: documents.len(),
            total_contradictions: contradictions.len(),
            processing_status,
        };

        AnalysisOutcome {
            documents,
            contradictions,
            report,
            summary,
        }
    }
}

impl Default for DocChecker {
    fn default() -> Self {
        Self::new()
    }
}
