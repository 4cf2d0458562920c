//! Regex extraction over raw page text, used when no table row parsed.
//!
//! Expected lines look like:
//!   15/01/2024   NEFT-ACME PAYROLL            25,000.00
//!   03 Feb 2024  UPI/PHONEPE/groceries        640.50
//!
//! The text carries no reliable debit/credit signal, so every match is
//! emitted as a debit and flagged.

use passbook_core::{categorize, Direction, Transaction, TransactionWarning};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::cells::parse_amount;
use crate::dates::resolve_date;
use crate::extract::clean_description;
use crate::types::{LayoutVariant, ParseOptions};

/// ISO dates first, then day-first slash/dash dates, then "DD Mon YYYY".
/// Each date must start a token so "2024-01-15" is never read as "24-01-15".
static LINE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        concat!(
            r"(?:^|\s)(?P<date>\d{4}[/-]\d{1,2}[/-]\d{1,2})\s+",
            r"(?P<desc>.+?)\s+",
            r"(?P<amount>\d+(?:,\d{3})*\.?\d*)"
        ),
        concat!(
            r"(?:^|\s)(?P<date>\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\s+",
            r"(?P<desc>.+?)\s+",
            r"(?P<amount>\d+(?:,\d{3})*\.?\d*)"
        ),
        concat!(
            r"(?i)(?:^|\s)(?P<date>\d{1,2}\s+[a-z]{3}\s+\d{4})\s+",
            r"(?P<desc>.+?)\s+",
            r"(?P<amount>\d+(?:,\d{3})*\.?\d*)"
        ),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static line pattern"))
    .collect()
});

/// Extract one transaction from a text line, if any pattern matches.
pub fn extract_line(line: &str, opts: &ParseOptions) -> Option<Transaction> {
    let line = line.trim();

    let caps = LINE_PATTERNS.iter().find_map(|re| re.captures(line))?;
    let amount = parse_amount(&caps["amount"])?;
    if amount <= 0.0 {
        debug!(line, "text line has zero amount");
        return None;
    }

    let resolved = resolve_date(&caps["date"], opts.today);
    let description = clean_description(
        &caps["desc"],
        LayoutVariant::FreeTextLine.description_limit(),
    );
    let category = categorize(&description).to_string();

    let mut txn = Transaction::new(resolved.date, description, amount, Direction::Debit, category)
        .with_warning(TransactionWarning::DirectionAssumed);
    if resolved.substituted {
        txn = txn.with_warning(TransactionWarning::DateSubstituted);
    }
    Some(txn)
}

/// Run the line patterns over every line of `text`.
pub fn extract_text(text: &str, opts: &ParseOptions) -> Vec<Transaction> {
    text.lines().filter_map(|line| extract_line(line, opts)).collect()
}
