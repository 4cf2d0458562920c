//! Canonical transaction record produced by every statement parser

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single normalized statement line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Batch-local sequence number (1-based, reassigned after dedup)
    pub id: u32,
    /// Calendar date, serialized as YYYY-MM-DD
    pub date: NaiveDate,
    /// Trimmed narrative, capped with "..." when truncated
    pub description: String,
    /// Always non-negative; the sign lives in `direction`
    pub amount: f64,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub category: String,
    #[serde(rename = "frequency")]
    pub recurrence: Recurrence,
    /// Values the parser had to assume rather than read
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TransactionWarning>,
}

/// Flow direction of money relative to the account holder
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "debit")]
    Debit,
}

impl Direction {
    /// Parse a "credit"/"debit" tag, case-insensitively
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "credit" => Some(Direction::Credit),
            "debit" => Some(Direction::Debit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Credit => "credit",
            Direction::Debit => "debit",
        }
    }
}

/// Recurrence tag, assigned by the post-pass in [`crate::recurrence`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Recurrence {
    #[default]
    #[serde(rename = "one-time")]
    OneTime,
    #[serde(rename = "recurring")]
    Recurring,
    #[serde(rename = "irregular")]
    Irregular,
}

/// Marks a field that was filled in by a fallback instead of read from the row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionWarning {
    /// Date text was unparseable; the processing date was used instead
    #[serde(rename = "date-substituted")]
    DateSubstituted,
    /// Direction was not present in the source; debit was assumed
    #[serde(rename = "direction-assumed")]
    DirectionAssumed,
}

impl Transaction {
    /// Create a transaction with id 0 and a one-time recurrence tag.
    /// Ids are assigned when the batch is deduplicated.
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        direction: Direction,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            date,
            description: description.into(),
            amount: round_cents(amount.abs()),
            direction,
            category: category.into(),
            recurrence: Recurrence::OneTime,
            warnings: Vec::new(),
        }
    }

    /// Builder: attach a warning (no duplicates)
    pub fn with_warning(mut self, warning: TransactionWarning) -> Self {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
        self
    }

    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }

    /// True when any field was assumed rather than read
    pub fn is_low_confidence(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Signed amount: credits positive, debits negative
    pub fn signed_amount(&self) -> f64 {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }

    /// Amount in integer minor units (paise/cents)
    pub fn amount_minor(&self) -> i64 {
        (self.amount * 100.0).round() as i64
    }
}

/// Round to 2 decimal places
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_new_normalizes_amount() {
        let t = Transaction::new(date(), "Grocery Store", -500.004, Direction::Debit, "Others");
        assert_eq!(t.amount, 500.0);
        assert_eq!(t.id, 0);
        assert_eq!(t.recurrence, Recurrence::OneTime);
        assert_eq!(t.signed_amount(), -500.0);
        assert_eq!(t.amount_minor(), 50000);
    }

    #[test]
    fn test_direction_from_tag() {
        assert_eq!(Direction::from_tag("CREDIT"), Some(Direction::Credit));
        assert_eq!(Direction::from_tag(" debit "), Some(Direction::Debit));
        assert_eq!(Direction::from_tag("transfer"), None);
    }

    #[test]
    fn test_wire_shape() {
        let mut t = Transaction::new(date(), "Salary Credit", 5000.0, Direction::Credit, "Salary");
        t.id = 1;
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["date"], "2024-01-15");
        assert_eq!(v["type"], "credit");
        assert_eq!(v["frequency"], "one-time");
        assert_eq!(v["amount"], 5000.0);
        assert!(v.get("warnings").is_none());

        let flagged = t.with_warning(TransactionWarning::DateSubstituted);
        let v = serde_json::to_value(&flagged).unwrap();
        assert_eq!(v["warnings"][0], "date-substituted");
        assert!(flagged.is_low_confidence());
    }

    #[test]
    fn test_with_warning_is_idempotent() {
        let t = Transaction::new(date(), "x", 1.0, Direction::Debit, "Others")
            .with_warning(TransactionWarning::DirectionAssumed)
            .with_warning(TransactionWarning::DirectionAssumed);
        assert_eq!(t.warnings.len(), 1);
    }
}
