//! Recurrence tagging post-pass

use std::collections::HashMap;

use crate::transaction::{Recurrence, Transaction};

/// Group by `(description, amount)`; groups with more than one member are
/// tagged recurring, everything else one-time.
pub fn mark_recurring(txns: &mut [Transaction]) {
    let mut counts: HashMap<(String, i64), usize> = HashMap::new();
    for t in txns.iter() {
        *counts
            .entry((t.description.clone(), t.amount_minor()))
            .or_insert(0) += 1;
    }

    for t in txns.iter_mut() {
        let n = counts
            .get(&(t.description.clone(), t.amount_minor()))
            .copied()
            .unwrap_or(0);
        t.recurrence = if n > 1 {
            Recurrence::Recurring
        } else {
            Recurrence::OneTime
        };
    }
}
