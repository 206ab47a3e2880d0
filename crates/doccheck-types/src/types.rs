use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Priority tag on a contradiction. Total order: critical < high < medium < low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Sort rank, 0 = most severe.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed tag for an extracted clause.
///
/// Unrecognized tags round-trip through `Other`; the detector falls back
/// to exact-text comparison for them. Equality, ordering and hashing all
/// go through the tag string, so `Other("salary")` and `Salary` are the
/// same key.
#[derive(Debug, Clone)]
pub enum ClauseType {
    NoticePeriod,
    WorkingHours,
    TerminationClause,
    Deadline,
    Salary,
    ImportantDates,
    Other(String),
}

impl ClauseType {
    pub fn as_str(&self) -> &str {
        match self {
            ClauseType::NoticePeriod => "notice_period",
            ClauseType::WorkingHours => "working_hours",
            ClauseType::TerminationClause => "termination_clause",
            ClauseType::Deadline => "deadline",
            ClauseType::Salary => "salary",
            ClauseType::ImportantDates => "important_dates",
            ClauseType::Other(name) => name,
        }
    }

    /// Human-readable form used in contradiction summaries,
    /// e.g. `notice_period` -> "Notice Period".
    pub fn title_case(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<&str> for ClauseType {
    fn from(name: &str) -> Self {
        match name {
            "notice_period" => ClauseType::NoticePeriod,
            "working_hours" => ClauseType::WorkingHours,
            "termination_clause" => ClauseType::TerminationClause,
            "deadline" => ClauseType::Deadline,
            "salary" => ClauseType::Salary,
            "important_dates" => ClauseType::ImportantDates,
            other => ClauseType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ClauseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for ClauseType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ClauseType {}

impl std::hash::Hash for ClauseType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for ClauseType {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClauseType {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Serialize for ClauseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClauseType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ClauseType::from(name.as_str()))
    }
}

/// A normalized clause value: a single string, or an ordered list of
/// strings for `important_dates`. Immutable after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClauseValue {
    Text(String),
    List(Vec<String>),
}

impl ClauseValue {
    pub fn text(value: impl Into<String>) -> Self {
        ClauseValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ClauseValue::Text(s) => Some(s),
            ClauseValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ClauseValue::Text(_) => None,
            ClauseValue::List(items) => Some(items),
        }
    }
}

impl fmt::Display for ClauseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseValue::Text(s) => f.write_str(s),
            ClauseValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Success,
    Failed,
}

/// One document after the extraction stage. Consumed read-only by the
/// detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<i64>,
    pub file_path: String,
    pub clauses: BTreeMap<ClauseType, ClauseValue>,
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParsedDocument {
    pub fn success(
        filename: impl Into<String>,
        file_path: impl Into<String>,
        clauses: BTreeMap<ClauseType, ClauseValue>,
    ) -> Self {
        Self {
            filename: filename.into(),
            doc_id: None,
            file_path: file_path.into(),
            clauses,
            status: DocumentStatus::Success,
            error: None,
        }
    }

    pub fn failed(
        filename: impl Into<String>,
        file_path: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            doc_id: None,
            file_path: file_path.into(),
            clauses: BTreeMap::new(),
            status: DocumentStatus::Failed,
            error: Some(error.into()),
        }
    }
}

/// Comparison strategy selected per clause type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonType {
    TimeDuration,
    TimeRange,
    Numeric,
    DateTime,
    DateList,
    TextSemantic,
    TextExact,
}

impl ComparisonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonType::TimeDuration => "time_duration",
            ComparisonType::TimeRange => "time_range",
            ComparisonType::Numeric => "numeric",
            ComparisonType::DateTime => "datetime",
            ComparisonType::DateList => "date_list",
            ComparisonType::TextSemantic => "text_semantic",
            ComparisonType::TextExact => "text_exact",
        }
    }
}

/// Static rule entry: how one clause type is compared and how a mismatch
/// is classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContradictionRule {
    pub comparison: ComparisonType,
    pub severity: Severity,
    pub description: String,
}

/// One of the two documents contributing to a contradiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContradictionParty {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<i64>,
    pub value: ClauseValue,
}

/// A detected disagreement between two documents' values for the same
/// clause type.
///
/// Ids are 1-based and assigned after the (severity, clause_type) sort;
/// they are not stable identifiers across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contradiction {
    pub id: u32,
    pub clause_type: ClauseType,
    pub severity: Severity,
    pub description: String,
    pub summary: String,
    pub documents: Vec<ContradictionParty>,
    pub details: serde_json::Map<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_severity_total_order() {
        assert!(Severity::Critical < Severity::High);
        assert!(Severity::High < Severity::Medium);
        assert!(Severity::Medium < Severity::Low);
        assert_eq!(Severity::Critical.rank(), 0);
        assert_eq!(Severity::Low.rank(), 3);
    }

    #[test]
    fn test_clause_type_round_trip() {
        for name in [
            "notice_period",
            "working_hours",
            "termination_clause",
            "deadline",
            "salary",
            "important_dates",
            "probation_period",
        ] {
            let clause_type = ClauseType::from(name);
            assert_eq!(clause_type.as_str(), name);
            let json = serde_json::to_string(&clause_type).unwrap();
            let back: ClauseType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, clause_type);
        }
        assert_eq!(
            ClauseType::from("probation_period"),
            ClauseType::Other("probation_period".to_string())
        );
    }

    #[test]
    fn test_other_variant_equals_canonical_tag() {
        let other = ClauseType::Other("salary".to_string());
        assert_eq!(other, ClauseType::Salary);
        assert_eq!(other.cmp(&ClauseType::Salary), std::cmp::Ordering::Equal);

        // One key, not two, when both forms land in a map
        let mut counts: BTreeMap<ClauseType, usize> = BTreeMap::new();
        *counts.entry(ClauseType::Salary).or_default() += 1;
        *counts.entry(other).or_default() += 1;
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[&ClauseType::Salary], 2);
    }

    #[test]
    fn test_clause_type_title_case() {
        assert_eq!(ClauseType::NoticePeriod.title_case(), "Notice Period");
        assert_eq!(ClauseType::Salary.title_case(), "Salary");
        assert_eq!(
            ClauseType::Other("probation_period".to_string()).title_case(),
            "Probation Period"
        );
    }

    #[test]
    fn test_clause_value_untagged_json() {
        let text: ClauseValue = serde_json::from_str("\"30 days\"").unwrap();
        assert_eq!(text, ClauseValue::text("30 days"));

        let list: ClauseValue = serde_json::from_str("[\"Jan 1, 2024\", \"Feb 2, 2024\"]").unwrap();
        assert_eq!(
            list,
            ClauseValue::List(vec!["Jan 1, 2024".to_string(), "Feb 2, 2024".to_string()])
        );
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
    }
}
