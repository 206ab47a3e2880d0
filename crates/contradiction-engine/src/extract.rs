//! Clause extraction: pattern recognizers plus per-type normalization.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use doccheck_types::{ClauseType, ClauseValue};
use lazy_static::lazy_static;
use regex::Regex;

use crate::normalize::normalize;
use crate::patterns::CLAUSE_PATTERNS;

/// Maximum number of entries kept for `important_dates`.
const MAX_DATES: usize = 3;

/// String values outside this length range are dropped silently.
const MIN_VALUE_LEN: usize = 2;
const MAX_VALUE_LEN: usize = 200;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref DURATION: Regex = Regex::new(r"(?i)(\d+)\s+(days?|weeks?|months?)").unwrap();
    static ref HOURS_12H: Regex =
        Regex::new(r"(?i)(\d{1,2})\s*(am|pm)\s*(?:to|-)\s*(\d{1,2})\s*(am|pm)").unwrap();
    static ref HOURS_24H: Regex =
        Regex::new(r"(\d{1,2}):\d{2}\s*(?:to|-)\s*(\d{1,2}):\d{2}").unwrap();
    static ref DEADLINE_PREFIX: Regex = Regex::new(
        r"(?i)(?:deadline|due|expires?|must\s+be\s+(?:completed|submitted|done))\s*:?\s*(?:by|on|before)?\s*(.*?)(?:\.|$)"
    )
    .unwrap();
}

/// A clause recognizer producing a partial clause map.
///
/// Registered extractors run in priority order over the same normalized
/// text; later extractors overwrite earlier ones per key. The regex
/// recognizer is always registered last, so its output wins whenever it
/// claims a clause type.
pub trait Extractor: Send + Sync {
    fn extract(&self, text: &str) -> BTreeMap<ClauseType, ClauseValue>;
}

/// Pattern-rule recognizer; the authoritative fallback.
#[derive(Debug, Default)]
pub struct RegexExtractor;

impl Extractor for RegexExtractor {
    fn extract(&self, text: &str) -> BTreeMap<ClauseType, ClauseValue> {
        let mut clauses = BTreeMap::new();

        for set in CLAUSE_PATTERNS.iter() {
            let mut matches: Vec<String> = Vec::new();
            for pattern in &set.patterns {
                for found in pattern.find_iter(text) {
                    matches.push(found.as_str().trim().to_string());
                }
            }
            if matches.is_empty() {
                continue;
            }

            let value = match set.clause_type {
                ClauseType::ImportantDates => {
                    matches.truncate(MAX_DATES);
                    ClauseValue::List(matches)
                }
                ClauseType::NoticePeriod => ClauseValue::Text(normalize_notice_period(&matches[0])),
                ClauseType::WorkingHours => ClauseValue::Text(normalize_working_hours(&matches[0])),
                ClauseType::Deadline => ClauseValue::Text(normalize_deadline(&matches[0])),
                _ => ClauseValue::Text(matches[0].clone()),
            };
            clauses.insert(set.clause_type.clone(), value);
        }

        clauses
    }
}

/// Runs the registered recognizers over normalized text and merges
/// their outputs into one clause map per document.
pub struct ClauseExtractor {
    extractors: Vec<Box<dyn Extractor>>,
}

impl ClauseExtractor {
    pub fn new() -> Self {
        Self {
            extractors: vec![Box::new(RegexExtractor)],
        }
    }

    /// Register a recognizer ahead of the regex fallback. The fallback
    /// stays last so it overwrites any clause type both produce.
    pub fn register(&mut self, extractor: Box<dyn Extractor>) {
        let last = self.extractors.len() - 1;
        self.extractors.insert(last, extractor);
    }

    pub fn extract(&self, text: &str) -> BTreeMap<ClauseType, ClauseValue> {
        let text = normalize(text);

        let mut clauses = BTreeMap::new();
        for extractor in &self.extractors {
            for (clause_type, value) in extractor.extract(&text) {
                clauses.insert(clause_type, value);
            }
        }

        post_process(clauses)
    }
}

impl Default for ClauseExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Length-filter extracted values; drop clause types nothing survives for.
pub(crate) fn post_process(
    clauses: BTreeMap<ClauseType, ClauseValue>,
) -> BTreeMap<ClauseType, ClauseValue> {
    let mut processed = BTreeMap::new();

    for (clause_type, value) in clauses {
        match value {
            ClauseValue::Text(s) => {
                let cleaned = WHITESPACE.replace_all(s.trim(), " ").into_owned();
                let len = cleaned.chars().count();
                if (MIN_VALUE_LEN..=MAX_VALUE_LEN).contains(&len) {
                    processed.insert(clause_type, ClauseValue::Text(cleaned));
                }
            }
            ClauseValue::List(items) => {
                let cleaned: Vec<String> = items
                    .into_iter()
                    .map(|item| item.trim().to_string())
                    .filter(|item| item.chars().count() > 2)
                    .collect();
                if !cleaned.is_empty() {
                    processed.insert(clause_type, ClauseValue::List(cleaned));
                }
            }
        }
    }

    processed
}

/// Re-render a notice period as `"<n> <unit>"` with correct plural.
fn normalize_notice_period(text: &str) -> String {
    if let Some(caps) = DURATION.captures(text) {
        let number = &caps[1];
        let unit = caps[2].to_lowercase();
        let unit = unit.trim_end_matches('s');
        let plural = number.parse::<u64>().map(|n| n > 1).unwrap_or(true);
        return format!("{} {}{}", number, unit, if plural { "s" } else { "" });
    }

    // Written numbers survive only when no digit form was present.
    let lower = text.to_lowercase();
    for (word, digits) in [
        ("fourteen", "14"),
        ("thirty", "30"),
        ("sixty", "60"),
        ("ninety", "90"),
    ] {
        if lower.contains(word) {
            for unit in ["day", "week", "month"] {
                if lower.contains(unit) {
                    return format!("{digits} {unit}s");
                }
            }
        }
    }

    text.trim().to_string()
}

/// Re-render working hours as `"<h> AM to <h> PM"`; 24-hour ranges are
/// kept verbatim.
fn normalize_working_hours(text: &str) -> String {
    if let Some(caps) = HOURS_12H.captures(text) {
        return format!(
            "{} {} to {} {}",
            &caps[1],
            caps[2].to_uppercase(),
            &caps[3],
            caps[4].to_uppercase()
        );
    }

    if let Some(found) = HOURS_24H.find(text) {
        return found.as_str().to_string();
    }

    text.trim().to_string()
}

/// Strip the deadline keyword and leading preposition; render parseable
/// dates as `"<Month> <D>, <YYYY>"`.
fn normalize_deadline(text: &str) -> String {
    if let Some(caps) = DEADLINE_PREFIX.captures(text) {
        let deadline = caps[1].trim().to_string();
        if let Some(date) = parse_flexible_date(&deadline) {
            return date.format("%B %-d, %Y").to_string();
        }
        return deadline;
    }

    text.trim().to_string()
}

fn parse_flexible_date(text: &str) -> Option<NaiveDate> {
    const FORMATS: &[&str] = &[
        "%B %d, %Y",
        "%B %d %Y",
        "%d %B %Y",
        "%m/%d/%Y",
        "%m/%d/%y",
        "%m-%d-%Y",
        "%Y-%m-%d",
    ];

    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}
