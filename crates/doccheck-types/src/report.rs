//! Aggregated analysis output: contradiction report and batch outcome.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{ClauseType, Contradiction, ParsedDocument, Severity};

/// Summary of a contradiction set: tallies plus recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContradictionReport {
    pub summary: String,
    pub total_contradictions: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_clause_type: BTreeMap<ClauseType, usize>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_critical: Option<Contradiction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Success,
    InsufficientDocuments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_documents: usize,
    pub total_contradictions: usize,
    pub processing_status: ProcessingStatus,
}

/// Result of one batch analysis run. Failed extractions are carried in
/// `documents` with status `failed`; they never abort the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub documents: Vec<ParsedDocument>,
    pub contradictions: Vec<Contradiction>,
    pub report: ContradictionReport,
    pub summary: AnalysisSummary,
}
