//! Type-specific value comparators.
//!
//! Every comparator is pure, commutative in its boolean result, and
//! fail-safe: a comparator that cannot evaluate a pair records an
//! `error` field in the evidence and reports no contradiction.

use std::collections::BTreeSet;

use doccheck_types::{ClauseValue, ComparisonType};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Map, Value};

/// Fixed antonym pairs scanned by the semantic-text comparator.
const CONFLICTING_PAIRS: &[(&str, &str)] = &[
    ("with", "without"),
    ("cause", "no cause"),
    ("immediate", "notice"),
    ("either", "employer only"),
];

/// Jaccard word-overlap similarity below which two texts are flagged as
/// conflicting when no antonym pair matches.
const SIMILARITY_THRESHOLD: f64 = 0.5;

lazy_static! {
    static ref DURATION: Regex = Regex::new(r"(?i)(\d+)\s+(days?|weeks?|months?)").unwrap();
    static ref TIME_RANGE: Regex =
        Regex::new(r"(?i)(\d{1,2})\s*(am|pm)\s*(?:to|-)\s*(\d{1,2})\s*(am|pm)").unwrap();
    static ref K_SUFFIX: Regex = Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*K").unwrap();
    static ref NUMBER: Regex = Regex::new(r"(\d+(?:\.\d{2})?)").unwrap();
    static ref KEY_TERMS: Regex =
        Regex::new(r"\b(?:terminate|end|dismiss|cause|notice|party)\b").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Outcome of comparing two clause values.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub differs: bool,
    pub evidence: Map<String, Value>,
}

/// Compare two clause values under the given strategy.
pub fn compare(value1: &ClauseValue, value2: &ClauseValue, comparison: ComparisonType) -> Comparison {
    let text1 = value1.to_string();
    let text2 = value2.to_string();

    let mut evidence = Map::new();
    evidence.insert("comparison_type".into(), json!(comparison.as_str()));
    evidence.insert("value1".into(), json!(text1));
    evidence.insert("value2".into(), json!(text2));

    let result = match comparison {
        ComparisonType::TimeDuration => compare_durations(&text1, &text2, &mut evidence),
        ComparisonType::TimeRange => compare_time_ranges(&text1, &text2, &mut evidence),
        ComparisonType::Numeric => compare_numeric(&text1, &text2, &mut evidence),
        ComparisonType::DateTime => compare_datetime(&text1, &text2, &mut evidence),
        ComparisonType::DateList => compare_date_lists(value1, value2, &mut evidence),
        ComparisonType::TextSemantic => compare_text_semantic(&text1, &text2, &mut evidence),
        ComparisonType::TextExact => compare_text_exact(&text1, &text2, &mut evidence),
    };

    let differs = match result {
        Ok(differs) => differs,
        Err(error) => {
            evidence.insert("error".into(), json!(error));
            false
        }
    };

    Comparison { differs, evidence }
}

/// Parse a duration into days (week = 7, month = 30).
fn parse_duration_days(text: &str) -> Option<i64> {
    let caps = DURATION.captures(text)?;
    let number: i64 = caps[1].parse().ok()?;
    let unit = caps[2].to_lowercase();

    if unit.starts_with("day") {
        Some(number)
    } else if unit.starts_with("week") {
        number.checked_mul(7)
    } else {
        number.checked_mul(30)
    }
}

fn compare_durations(
    text1: &str,
    text2: &str,
    evidence: &mut Map<String, Value>,
) -> Result<bool, String> {
    let days1 = parse_duration_days(text1);
    let days2 = parse_duration_days(text2);

    evidence.insert("parsed_days1".into(), json!(days1));
    evidence.insert("parsed_days2".into(), json!(days2));

    if let (Some(days1), Some(days2)) = (days1, days2) {
        let differs = days1 != days2;
        evidence.insert(
            "difference_days".into(),
            json!(if differs { (days1 - days2).abs() } else { 0 }),
        );
        return Ok(differs);
    }

    // Fallback when either side fails to parse
    Ok(fallback_text_differs(text1, text2))
}

/// Parse `H am/pm to H am/pm` into (start, end) hours in 24-hour form.
fn parse_time_range(text: &str) -> Option<(i64, i64)> {
    let caps = TIME_RANGE.captures(text)?;
    let start: i64 = caps[1].parse().ok()?;
    let end: i64 = caps[3].parse().ok()?;

    Some((
        to_24_hour(start, &caps[2].to_lowercase()),
        to_24_hour(end, &caps[4].to_lowercase()),
    ))
}

fn to_24_hour(hour: i64, meridiem: &str) -> i64 {
    match (meridiem, hour) {
        ("pm", h) if h != 12 => h + 12,
        ("am", 12) => 0,
        (_, h) => h,
    }
}

fn compare_time_ranges(
    text1: &str,
    text2: &str,
    evidence: &mut Map<String, Value>,
) -> Result<bool, String> {
    let range1 = parse_time_range(text1);
    let range2 = parse_time_range(text2);

    evidence.insert(
        "parsed_range1".into(),
        range1.map(|(s, e)| json!([s, e])).unwrap_or(Value::Null),
    );
    evidence.insert(
        "parsed_range2".into(),
        range2.map(|(s, e)| json!([s, e])).unwrap_or(Value::Null),
    );

    if let (Some(range1), Some(range2)) = (range1, range2) {
        let differs = range1 != range2;
        if differs {
            evidence.insert("start_time_diff".into(), json!((range1.0 - range2.0).abs()));
            evidence.insert("end_time_diff".into(), json!((range1.1 - range2.1).abs()));
        }
        return Ok(differs);
    }

    Ok(fallback_text_differs(text1, text2))
}

/// Strip currency punctuation, expand `K` suffixes, then take the first
/// number.
fn extract_number(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != '$' && *c != ',').collect();

    if cleaned.to_uppercase().contains('K') {
        if let Some(caps) = K_SUFFIX.captures(&cleaned) {
            if let Ok(number) = caps[1].parse::<f64>() {
                return Some(number * 1000.0);
            }
        }
    }

    NUMBER
        .captures(&cleaned)
        .and_then(|caps| caps[1].parse::<f64>().ok())
}

fn compare_numeric(
    text1: &str,
    text2: &str,
    evidence: &mut Map<String, Value>,
) -> Result<bool, String> {
    let num1 = extract_number(text1);
    let num2 = extract_number(text2);

    evidence.insert("parsed_num1".into(), json!(num1));
    evidence.insert("parsed_num2".into(), json!(num2));

    if let (Some(num1), Some(num2)) = (num1, num2) {
        let differs = num1 != num2;
        if differs {
            let larger = num1.max(num2);
            if larger == 0.0 {
                return Err("cannot compute percentage difference of zero values".to_string());
            }
            evidence.insert("difference".into(), json!((num1 - num2).abs()));
            evidence.insert(
                "percentage_diff".into(),
                json!((num1 - num2).abs() / larger * 100.0),
            );
        }
        return Ok(differs);
    }

    Ok(fallback_text_differs(text1, text2))
}

fn compare_datetime(
    text1: &str,
    text2: &str,
    evidence: &mut Map<String, Value>,
) -> Result<bool, String> {
    let normalized1 = WHITESPACE
        .replace_all(text1.trim(), " ")
        .to_lowercase();
    let normalized2 = WHITESPACE
        .replace_all(text2.trim(), " ")
        .to_lowercase();

    evidence.insert("normalized1".into(), json!(normalized1));
    evidence.insert("normalized2".into(), json!(normalized2));

    Ok(normalized1 != normalized2)
}

fn compare_date_lists(
    value1: &ClauseValue,
    value2: &ClauseValue,
    evidence: &mut Map<String, Value>,
) -> Result<bool, String> {
    let (list1, list2) = match (value1.as_list(), value2.as_list()) {
        (Some(list1), Some(list2)) => (list1, list2),
        // Set comparison only applies to literal lists
        _ => return compare_text_exact(&value1.to_string(), &value2.to_string(), evidence),
    };

    let set1: BTreeSet<String> = list1.iter().map(|v| v.trim().to_lowercase()).collect();
    let set2: BTreeSet<String> = list2.iter().map(|v| v.trim().to_lowercase()).collect();

    let common: Vec<&String> = set1.intersection(&set2).collect();
    let unique1: Vec<&String> = set1.difference(&set2).collect();
    let unique2: Vec<&String> = set2.difference(&set1).collect();

    evidence.insert("common_dates".into(), json!(common));
    evidence.insert("unique_to_doc1".into(), json!(unique1));
    evidence.insert("unique_to_doc2".into(), json!(unique2));

    Ok(set1 != set2)
}

fn compare_text_semantic(
    text1: &str,
    text2: &str,
    evidence: &mut Map<String, Value>,
) -> Result<bool, String> {
    let text1 = text1.trim().to_lowercase();
    let text2 = text2.trim().to_lowercase();

    let key_terms1: BTreeSet<&str> = KEY_TERMS.find_iter(&text1).map(|m| m.as_str()).collect();
    let key_terms2: BTreeSet<&str> = KEY_TERMS.find_iter(&text2).map(|m| m.as_str()).collect();

    let mut has_conflict = false;
    for (term1, term2) in CONFLICTING_PAIRS {
        if (text1.contains(term1) && text2.contains(term2))
            || (text2.contains(term1) && text1.contains(term2))
        {
            has_conflict = true;
            evidence.insert("conflicting_terms".into(), json!([term1, term2]));
            break;
        }
    }

    evidence.insert("key_terms1".into(), json!(key_terms1));
    evidence.insert("key_terms2".into(), json!(key_terms2));
    evidence.insert("semantic_conflict".into(), json!(has_conflict));

    // Without an antonym match, very dissimilar texts still conflict
    if !has_conflict {
        let similarity = jaccard_similarity(&text1, &text2);
        evidence.insert("similarity_score".into(), json!(similarity));
        has_conflict = similarity < SIMILARITY_THRESHOLD;
    }

    Ok(has_conflict)
}

fn compare_text_exact(
    text1: &str,
    text2: &str,
    evidence: &mut Map<String, Value>,
) -> Result<bool, String> {
    let normalized1 = text1.trim().to_lowercase();
    let normalized2 = text2.trim().to_lowercase();
    let similarity = jaccard_similarity(&normalized1, &normalized2);

    evidence.insert("normalized1".into(), json!(normalized1));
    evidence.insert("normalized2".into(), json!(normalized2));
    evidence.insert("similarity_score".into(), json!(similarity));

    Ok(normalized1 != normalized2)
}

fn fallback_text_differs(text1: &str, text2: &str) -> bool {
    text1.trim().to_lowercase() != text2.trim().to_lowercase()
}

/// Jaccard word-overlap similarity in [0, 1].
fn jaccard_similarity(text1: &str, text2: &str) -> f64 {
    if text1.is_empty() && text2.is_empty() {
        return 1.0;
    }
    if text1.is_empty() || text2.is_empty() {
        return 0.0;
    }

    let words1: BTreeSet<&str> = text1.split_whitespace().collect();
    let words2: BTreeSet<&str> = text2.split_whitespace().collect();

    let intersection = words1.intersection(&words2).count();
    let union = words1.union(&words2).count();

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}
