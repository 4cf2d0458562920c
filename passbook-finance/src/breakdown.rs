//! Spending and income totals per category.

use passbook_core::{round_cents, Direction, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

/// Totals per category for one direction, largest first (ties by name).
pub fn category_breakdown(txns: &[Transaction], direction: Direction) -> Vec<CategoryTotal> {
    let mut groups: HashMap<&str, (f64, usize)> = HashMap::new();

    for txn in txns.iter().filter(|t| t.direction == direction) {
        let entry = groups.entry(txn.category.as_str()).or_default();
        entry.0 += txn.amount;
        entry.1 += 1;
    }

    let mut out: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total: round_cents(total),
            count,
        })
        .collect();

    out.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    out
}
