//! Contradiction report generation.

use std::collections::BTreeMap;

use doccheck_types::{ClauseType, Contradiction, ContradictionReport, Severity};

/// Tally a sorted contradiction list into a report with fixed-threshold
/// recommendations.
pub fn generate_report(contradictions: &[Contradiction]) -> ContradictionReport {
    if contradictions.is_empty() {
        return ContradictionReport {
            summary: "No contradictions found".to_string(),
            total_contradictions: 0,
            by_severity: BTreeMap::new(),
            by_clause_type: BTreeMap::new(),
            recommendations: Vec::new(),
            most_critical: None,
        };
    }

    let mut by_severity: BTreeMap<Severity, usize> = BTreeMap::new();
    let mut by_clause_type: BTreeMap<ClauseType, usize> = BTreeMap::new();
    for contradiction in contradictions {
        *by_severity.entry(contradiction.severity).or_default() += 1;
        *by_clause_type
            .entry(contradiction.clause_type.clone())
            .or_default() += 1;
    }

    let mut recommendations = Vec::new();
    if by_severity.contains_key(&Severity::Critical) {
        recommendations.push(
            "Address critical contradictions immediately, especially salary or legal terms"
                .to_string(),
        );
    }
    if by_severity.contains_key(&Severity::High) {
        recommendations.push(
            "Review high-priority contradictions that may affect contract validity".to_string(),
        );
    }
    if by_clause_type.contains_key(&ClauseType::NoticePeriod) {
        recommendations
            .push("Standardize notice period requirements across all documents".to_string());
    }
    if by_clause_type.contains_key(&ClauseType::WorkingHours) {
        recommendations
            .push("Align working hours specifications in all relevant documents".to_string());
    }

    ContradictionReport {
        summary: format!(
            "Found {} contradiction(s) across documents",
            contradictions.len()
        ),
        total_contradictions: contradictions.len(),
        by_severity,
        by_clause_type,
        recommendations,
        most_critical: contradictions.first().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use doccheck_types::{ClauseValue, ContradictionParty};
    use pretty_assertions::assert_eq;

    fn contradiction(id: u32, clause_type: ClauseType, severity: Severity) -> Contradiction {
        Contradiction {
            id,
            clause_type,
            severity,
            description: "test".to_string(),
            summary: "test".to_string(),
            documents: vec![
                ContradictionParty {
                    filename: "a.pdf".to_string(),
                    doc_id: None,
                    value: ClauseValue::text("x1"),
                },
                ContradictionParty {
                    filename: "b.pdf".to_string(),
                    doc_id: None,
                    value: ClauseValue::text("y2"),
                },
            ],
            details: serde_json::Map::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_report() {
        let report = generate_report(&[]);
        assert_eq!(report.summary, "No contradictions found");
        assert_eq!(report.total_contradictions, 0);
        assert!(report.recommendations.is_empty());
        assert!(report.most_critical.is_none());
    }

    #[test]
    fn test_tallies_and_recommendations() {
        let contradictions = vec![
            contradiction(1, ClauseType::Salary, Severity::Critical),
            contradiction(2, ClauseType::NoticePeriod, Severity::High),
            contradiction(3, ClauseType::WorkingHours, Severity::Medium),
        ];

        let report = generate_report(&contradictions);
        assert_eq!(report.summary, "Found 3 contradiction(s) across documents");
        assert_eq!(report.by_severity[&Severity::Critical], 1);
        assert_eq!(report.by_severity[&Severity::High], 1);
        assert_eq!(report.by_clause_type[&ClauseType::Salary], 1);
        assert_eq!(report.recommendations.len(), 4);
        assert_eq!(report.most_critical.as_ref().unwrap().id, 1);
    }

    #[test]
    fn test_medium_only_report_has_no_urgent_recommendations() {
        let contradictions = vec![contradiction(1, ClauseType::ImportantDates, Severity::Medium)];
        let report = generate_report(&contradictions);
        assert!(report.recommendations.is_empty());
        assert_eq!(report.by_severity[&Severity::Medium], 1);
    }
}
