//! Cell classifiers and cleaners.
//!
//! Everything here is a pure function over a single cell string.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::RawRow;

const CURRENCY_GLYPHS: &[char] = &['₹', '$', '€', '£', '¥'];

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // DD/MM/YYYY or DD-MM-YY, optional HH:MM[:SS]
        r"^\d{1,2}/\d{1,2}/\d{2,4}(\s+\d{1,2}:\d{2}(:\d{2})?)?$",
        r"^\d{1,2}-\d{1,2}-\d{2,4}(\s+\d{1,2}:\d{2}(:\d{2})?)?$",
        // 15Jan2024, 15 Jan 2024
        r"^\d{1,2}\s?[A-Za-z]{3}\s?\d{4}$",
        // ISO, optional time
        r"^\d{4}/\d{1,2}/\d{1,2}(\s+\d{1,2}:\d{2}(:\d{2})?)?$",
        r"^\d{4}-\d{1,2}-\d{1,2}(\s+\d{1,2}:\d{2}(:\d{2})?)?$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static date pattern"))
    .collect()
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));
static SLASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*/\s*").expect("static pattern"));
static DASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*-\s*").expect("static pattern"));

/// Trim a cell and flatten embedded line breaks to spaces
pub fn clean_cell(cell: Option<&str>) -> String {
    cell.unwrap_or("")
        .replace(['\r', '\n'], " ")
        .trim()
        .to_string()
}

/// Clean every cell of a raw row; nulls become empty strings
pub fn clean_row(row: &RawRow) -> Vec<String> {
    row.iter().map(|c| clean_cell(c.as_deref())).collect()
}

/// Number of cells with content
pub fn non_empty_count(cells: &[String]) -> usize {
    cells.iter().filter(|c| !c.is_empty()).count()
}

/// Collapse whitespace runs and drop spaces around `/` and `-`.
pub fn normalize_date_text(text: &str) -> String {
    let s = text.replace(['\r', '\n'], "");
    let s = WHITESPACE.replace_all(s.trim(), " ");
    let s = SLASH.replace_all(&s, "/");
    DASH.replace_all(&s, "-").into_owned()
}

/// True if the cell looks like a date in any supported form
pub fn is_date(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    let cleaned = normalize_date_text(text);
    DATE_PATTERNS.iter().any(|re| re.is_match(&cleaned))
}

/// Strip currency glyphs, thousands separators and whitespace
pub fn clean_amount(text: &str) -> String {
    text.chars()
        .filter(|c| !CURRENCY_GLYPHS.contains(c) && *c != ',' && !c.is_whitespace())
        .collect()
}

/// Parse a cleaned amount; `None` for empty or non-numeric text.
/// Values too large to round to minor units are rejected as well.
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned = clean_amount(text);
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && (v * 100.0).is_finite())
}

/// True if the cell is a number once glyphs and separators are removed
pub fn is_amount(text: &str) -> bool {
    parse_amount(text).is_some()
}

/// True for an empty cell or one holding an amount
pub fn is_empty_or_amount(text: &str) -> bool {
    text.is_empty() || is_amount(text)
}

/// True if the cell is a "credit"/"debit" tag
pub fn is_direction_tag(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "credit" | "debit")
}

/// Truncate to `limit` characters, appending "..." when anything was cut
pub fn truncate_description(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit).collect();
    out.push_str("...");
    out
}
