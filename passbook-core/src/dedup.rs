//! Duplicate removal by composite key.
//!
//! Statements extracted from PDFs often repeat rows across page breaks, and
//! the same line can surface from both a table and the page text. Rows that
//! share `(date, amount, first 20 chars of description)` are collapsed; the
//! first occurrence wins and survivors are renumbered from 1.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::transaction::Transaction;

const KEY_PREFIX_CHARS: usize = 20;

/// Identity of a transaction for duplicate detection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub date: NaiveDate,
    /// Amount in minor units, so float noise can't split a key
    pub amount_minor: i64,
    pub description_prefix: String,
}

impl DedupKey {
    pub fn of(txn: &Transaction) -> Self {
        Self {
            date: txn.date,
            amount_minor: txn.amount_minor(),
            description_prefix: txn.description.chars().take(KEY_PREFIX_CHARS).collect(),
        }
    }
}

/// Keep the first transaction per key, preserving order, and renumber ids 1..=n.
pub fn deduplicate(txns: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(txns.len());

    for txn in txns {
        if seen.insert(DedupKey::of(&txn)) {
            out.push(txn);
        }
    }

    renumber(&mut out);
    out
}

/// Assign sequential 1-based ids in current order.
pub fn renumber(txns: &mut [Transaction]) {
    for (i, txn) in txns.iter_mut().enumerate() {
        txn.id = i as u32 + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::Direction;

    fn txn(day: u32, desc: &str, amount: f64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            desc,
            amount,
            Direction::Debit,
            "Others",
        )
    }

    #[test]
    fn test_identical_rows_collapse_to_first() {
        let out = deduplicate(vec![
            txn(15, "Grocery Store", 500.0),
            txn(15, "Grocery Store", 500.0),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn test_prefix_only_comparison() {
        // Same first 20 chars, different tails
        let out = deduplicate(vec![
            txn(15, "UPI/123456789/PAYTM/merchant-a", 99.0),
            txn(15, "UPI/123456789/PAYTM/merchant-b", 99.0),
        ]);
        assert_eq!(out.len(), 1);
        assert!(out[0].description.ends_with("merchant-a"));
    }

    #[test]
    fn test_space_at_prefix_boundary_is_significant() {
        // 19 chars vs. 21 chars whose 20th is a space
        let out = deduplicate(vec![
            txn(15, "ABCDEFGHIJKLMNOPQRS", 500.0),
            txn(15, "ABCDEFGHIJKLMNOPQRS X", 500.0),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].id, 2);
    }

    #[test]
    fn test_distinct_rows_keep_order_and_ids() {
        let out = deduplicate(vec![
            txn(16, "Rent", 12000.0),
            txn(15, "Grocery Store", 500.0),
            txn(16, "Rent", 12000.0),
            txn(15, "Grocery Store", 501.0),
        ]);
        let ids: Vec<u32> = out.iter().map(|t| t.id).collect();
        let descs: Vec<&str> = out.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(descs, vec!["Rent", "Grocery Store", "Grocery Store"]);
    }

    #[test]
    fn test_idempotent() {
        let once = deduplicate(vec![
            txn(1, "A", 1.0),
            txn(1, "A", 1.0),
            txn(2, "B", 2.0),
        ]);
        let twice = deduplicate(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_multibyte_prefix() {
        let a = txn(3, "₹₹₹₹₹₹₹₹₹₹₹₹₹₹₹₹₹₹₹₹₹ tail one", 10.0);
        let b = txn(3, "₹₹₹₹₹₹₹₹₹₹₹₹₹₹₹₹₹₹₹₹₹ tail two", 10.0);
        assert_eq!(DedupKey::of(&a), DedupKey::of(&b));
    }
}
