//! Static clause-type comparison rules.

use std::collections::BTreeMap;

use doccheck_types::{ClauseType, ComparisonType, ContradictionRule, Severity};

/// Immutable rule table injected into the detector at construction.
///
/// Unknown clause types resolve to the default rule (exact-text
/// comparison, medium severity), so a comparison rule is always
/// reachable.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: BTreeMap<ClauseType, ContradictionRule>,
}

impl RuleSet {
    /// The standard rule table.
    pub fn standard() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(
            ClauseType::NoticePeriod,
            rule(
                ComparisonType::TimeDuration,
                Severity::High,
                "Notice period requirements differ between documents",
            ),
        );
        rules.insert(
            ClauseType::WorkingHours,
            rule(
                ComparisonType::TimeRange,
                Severity::Medium,
                "Working hours specifications are inconsistent",
            ),
        );
        rules.insert(
            ClauseType::TerminationClause,
            rule(
                ComparisonType::TextSemantic,
                Severity::High,
                "Termination conditions conflict between documents",
            ),
        );
        rules.insert(
            ClauseType::Deadline,
            rule(
                ComparisonType::DateTime,
                Severity::High,
                "Deadline requirements are contradictory",
            ),
        );
        rules.insert(
            ClauseType::Salary,
            rule(
                ComparisonType::Numeric,
                Severity::Critical,
                "Salary amounts differ between documents",
            ),
        );
        rules.insert(
            ClauseType::ImportantDates,
            rule(
                ComparisonType::DateList,
                Severity::Medium,
                "Important dates are inconsistent across documents",
            ),
        );
        Self { rules }
    }

    /// Build a custom rule table.
    pub fn from_rules(rules: BTreeMap<ClauseType, ContradictionRule>) -> Self {
        Self { rules }
    }

    /// Look up the rule for a clause type, falling back to the default.
    pub fn rule_for(&self, clause_type: &ClauseType) -> ContradictionRule {
        self.rules.get(clause_type).cloned().unwrap_or_else(|| {
            ContradictionRule {
                comparison: ComparisonType::TextExact,
                severity: Severity::Medium,
                description: format!("{clause_type} values differ between documents"),
            }
        })
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

fn rule(comparison: ComparisonType, severity: Severity, description: &str) -> ContradictionRule {
    ContradictionRule {
        comparison,
        severity,
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let rules = RuleSet::standard();

        let salary = rules.rule_for(&ClauseType::Salary);
        assert_eq!(salary.comparison, ComparisonType::Numeric);
        assert_eq!(salary.severity, Severity::Critical);

        let notice = rules.rule_for(&ClauseType::NoticePeriod);
        assert_eq!(notice.comparison, ComparisonType::TimeDuration);
        assert_eq!(notice.severity, Severity::High);
    }

    #[test]
    fn test_unknown_type_gets_default_rule() {
        let rules = RuleSet::standard();
        let unknown = rules.rule_for(&ClauseType::Other("probation_period".to_string()));
        assert_eq!(unknown.comparison, ComparisonType::TextExact);
        assert_eq!(unknown.severity, Severity::Medium);
        assert_eq!(
            unknown.description,
            "probation_period values differ between documents"
        );
    }
}
