//! Text cleanup applied before clause extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PAGE_SEPARATOR: Regex = Regex::new(r"--- Page \d+ ---").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    /// Spelled-out numbers rewritten to digits, word-boundary anchored.
    static ref WRITTEN_NUMBERS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)\b(?:thirty|30)\b").unwrap(), "30"),
        (Regex::new(r"(?i)\b(?:sixty|60)\b").unwrap(), "60"),
        (Regex::new(r"(?i)\b(?:ninety|90)\b").unwrap(), "90"),
        (Regex::new(r"(?i)\b(?:fourteen|14)\b").unwrap(), "14"),
    ];
}

/// Collapse whitespace, strip page-separator markers and rewrite the
/// fixed set of spelled-out numbers. Pure and idempotent.
pub fn normalize(text: &str) -> String {
    let text = PAGE_SEPARATOR.replace_all(text, " ");
    let text = WHITESPACE.replace_all(&text, " ");

    let mut normalized = text.into_owned();
    for (pattern, digits) in WRITTEN_NUMBERS.iter() {
        normalized = pattern.replace_all(&normalized, *digits).into_owned();
    }

    normalized.trim().to_string()
}
