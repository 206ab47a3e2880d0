//! Clause extraction and cross-document contradiction detection.
//!
//! The engine is a two-stage pipeline: pattern-based clause extraction
//! with normalization, then pairwise contradiction detection with
//! type-specific comparators, severity classification and report
//! generation. All transforms are pure and synchronous; ingestion and
//! persistence stay behind the capability traits in `doccheck-types`.

pub mod compare;
pub mod detect;
pub mod extract;
pub mod normalize;
pub mod patterns;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod store;

pub use compare::{compare, Comparison};
pub use detect::ContradictionDetector;
pub use extract::{ClauseExtractor, Extractor, RegexExtractor};
pub use normalize::normalize;
pub use pipeline::{DocChecker, RawDocument};
pub use report::generate_report;
pub use rules::RuleSet;
pub use store::MemoryStore;
