//! Pairwise contradiction detection across a document batch.

use std::collections::BTreeMap;

use chrono::Utc;
use doccheck_types::{
    ClauseType, ClauseValue, Contradiction, ContradictionParty, ParsedDocument,
};
use tracing::debug;

use crate::compare::compare;
use crate::rules::RuleSet;

/// One clause occurrence tagged with its originating document.
struct ClauseInstance<'a> {
    filename: &'a str,
    doc_id: Option<i64>,
    value: &'a ClauseValue,
}

/// Stateless batch detector; the only configuration is the injected
/// rule table.
pub struct ContradictionDetector {
    rules: RuleSet,
}

impl ContradictionDetector {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self::new(RuleSet::standard())
    }

    /// Compare every unordered pair of clause values within each clause
    /// group. Returns contradictions sorted by (severity, clause type)
    /// with 1-based ids assigned post-sort.
    pub fn detect(&self, documents: &[ParsedDocument]) -> Vec<Contradiction> {
        if documents.len() < 2 {
            return Vec::new();
        }

        let groups = group_clauses_by_type(documents);
        let mut contradictions = Vec::new();

        for (clause_type, instances) in &groups {
            if instances.len() < 2 {
                continue;
            }

            let rule = self.rules.rule_for(clause_type);
            debug!(
                clause_type = %clause_type,
                instances = instances.len(),
                comparison = rule.comparison.as_str(),
                "comparing clause group"
            );

            for i in 0..instances.len() {
                for j in (i + 1)..instances.len() {
                    let first = &instances[i];
                    let second = &instances[j];
                    let comparison = compare(first.value, second.value, rule.comparison);
                    if !comparison.differs {
                        continue;
                    }

                    contradictions.push(Contradiction {
                        id: 0, // assigned after the sort
                        clause_type: clause_type.clone(),
                        severity: rule.severity,
                        description: rule.description.clone(),
                        summary: format!(
                            "{}: '{}' in {} vs '{}' in {}",
                            clause_type.title_case(),
                            first.value,
                            first.filename,
                            second.value,
                            second.filename
                        ),
                        documents: vec![
                            ContradictionParty {
                                filename: first.filename.to_string(),
                                doc_id: first.doc_id,
                                value: first.value.clone(),
                            },
                            ContradictionParty {
                                filename: second.filename.to_string(),
                                doc_id: second.doc_id,
                                value: second.value.clone(),
                            },
                        ],
                        details: comparison.evidence,
                        created_at: Utc::now(),
                    });
                }
            }
        }

        prioritize(contradictions)
    }
}

fn group_clauses_by_type(documents: &[ParsedDocument]) -> BTreeMap<ClauseType, Vec<ClauseInstance<'_>>> {
    let mut groups: BTreeMap<ClauseType, Vec<ClauseInstance<'_>>> = BTreeMap::new();

    for doc in documents {
        for (clause_type, value) in &doc.clauses {
            groups.entry(clause_type.clone()).or_default().push(ClauseInstance {
                filename: &doc.filename,
                doc_id: doc.doc_id,
                value,
            });
        }
    }

    groups
}

/// Stable sort by (severity rank, clause type name), then assign
/// sequential 1-based ids.
fn prioritize(mut contradictions: Vec<Contradiction>) -> Vec<Contradiction> {
    contradictions.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.clause_type.cmp(&b.clause_type))
    });

    for (index, contradiction) in contradictions.iter_mut().enumerate() {
        contradiction.id = (index + 1) as u32;
    }

    contradictions
}
