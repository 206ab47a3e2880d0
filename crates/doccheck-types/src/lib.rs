//! Shared data model for the document contradiction checker.

pub mod capabilities;
pub mod error;
pub mod report;
pub mod types;

pub use capabilities::{DocumentStore, TextSource};
pub use error::IngestError;
pub use report::{AnalysisOutcome, AnalysisSummary, ContradictionReport, ProcessingStatus};
pub use types::{
    ClauseType, ClauseValue, ComparisonType, Contradiction, ContradictionParty,
    ContradictionRule, DocumentStatus, ParsedDocument, Severity,
};
