//! Ordered pattern rules per clause type.
//!
//! Within one clause type the patterns are tried in order and the first
//! match is authoritative; `important_dates` is the exception and
//! accumulates matches.

use doccheck_types::ClauseType;
use lazy_static::lazy_static;
use regex::Regex;

pub struct PatternSet {
    pub clause_type: ClauseType,
    pub patterns: Vec<Regex>,
}

fn patterns(raw: &[&str]) -> Vec<Regex> {
    raw.iter().map(|p| Regex::new(p).unwrap()).collect()
}

lazy_static! {
    /// All clause recognizers, in extraction order.
    pub static ref CLAUSE_PATTERNS: Vec<PatternSet> = vec![
        PatternSet {
            clause_type: ClauseType::NoticePeriod,
            patterns: patterns(&[
                r"(?i)(\d+)\s+(days?|weeks?|months?)\s+notice",
                r"(?i)notice\s+period\s+of\s+(\d+)\s+(days?|weeks?|months?)",
                r"(?i)(thirty|sixty|ninety|fourteen)\s+days?\s+notice",
                r"(?i)(\d+)\s+(day|week|month)\s+notice\s+period",
            ]),
        },
        PatternSet {
            clause_type: ClauseType::WorkingHours,
            patterns: patterns(&[
                r"(?i)(\d{1,2})\s*(am|pm)\s*(?:to|-)\s*(\d{1,2})\s*(am|pm)",
                r"(?i)working\s+hours?\s*:?\s*(\d{1,2})\s*(am|pm)\s*(?:to|-)\s*(\d{1,2})\s*(am|pm)",
                r"(?i)office\s+hours?\s*:?\s*(\d{1,2})\s*(am|pm)\s*(?:to|-)\s*(\d{1,2})\s*(am|pm)",
                r"(\d{1,2}):\d{2}\s*(?:to|-)\s*(\d{1,2}):\d{2}",
            ]),
        },
        PatternSet {
            clause_type: ClauseType::TerminationClause,
            patterns: patterns(&[
                r"(?i)(?:either|any)\s+party\s+may\s+terminate",
                r"(?i)termination\s+of\s+(?:employment|contract|agreement)",
                r"(?i)(?:terminate|end)\s+(?:this\s+)?(?:employment|contract|agreement)",
                r"(?i)dismissal\s+(?:with|without)\s+cause",
            ]),
        },
        PatternSet {
            clause_type: ClauseType::Deadline,
            patterns: patterns(&[
                r"(?i)deadline\s*:?\s*(.*?)(?:\.|$)",
                r"(?i)due\s+(?:by|on|before)\s+(.*?)(?:\.|$)",
                r"(?i)must\s+be\s+(?:completed|submitted|done)\s+by\s+(.*?)(?:\.|$)",
                r"(?i)expires?\s+(?:on|at)\s+(.*?)(?:\.|$)",
            ]),
        },
        PatternSet {
            clause_type: ClauseType::Salary,
            patterns: patterns(&[
                r"\$(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)",
                r"(?i)salary\s+of\s+\$?(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)",
                r"(?i)(\d{1,3}(?:,\d{3})*)\s+(?:dollars?|usd)",
                r"(?i)annual\s+compensation\s+of\s+\$?(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)",
            ]),
        },
        PatternSet {
            clause_type: ClauseType::ImportantDates,
            patterns: patterns(&[
                r"(\d{1,2}/\d{1,2}/\d{2,4})",
                r"(\d{1,2}-\d{1,2}-\d{2,4})",
                r"(?i)((?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2},?\s+\d{4})",
                r"(?i)(\d{1,2}(?:st|nd|rd|th)?\s+(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{4})",
            ]),
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_tables_compile() {
        assert_eq!(CLAUSE_PATTERNS.len(), 6);
        for set in CLAUSE_PATTERNS.iter() {
            assert!(!set.patterns.is_empty(), "{} has no patterns", set.clause_type);
        }
    }

    #[test]
    fn test_notice_period_patterns() {
        let set = &CLAUSE_PATTERNS[0];
        assert!(set.patterns[0].is_match("30 days notice"));
        assert!(set.patterns[1].is_match("notice period of 2 weeks"));
        assert!(set.patterns[2].is_match("Thirty days notice"));
    }

    #[test]
    fn test_salary_patterns() {
        let set = &CLAUSE_PATTERNS[4];
        assert!(set.patterns[0].is_match("$75,000"));
        assert!(set.patterns[2].is_match("75,000 dollars"));
    }
}
