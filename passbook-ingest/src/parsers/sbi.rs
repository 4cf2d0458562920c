//! State Bank of India statements (not yet supported).

use passbook_core::Transaction;
use tracing::warn;

use super::StatementStrategy;
use crate::types::{ParseOptions, Table};

const INDICATORS: &[&str] = &[
    "state bank of india",
    "STATE BANK OF INDIA",
    "SBI",
    "sbi.co.in",
    "Corporate Internet Banking",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SbiStrategy;

impl StatementStrategy for SbiStrategy {
    fn bank_name(&self) -> &'static str {
        "State Bank of India"
    }

    fn indicators(&self) -> &'static [&'static str] {
        INDICATORS
    }

    fn parse(&self, _text: &str, tables: &[Table], _opts: &ParseOptions) -> Vec<Transaction> {
        warn!(bank = self.bank_name(), tables = tables.len(), "no parser for this bank yet");
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicators() {
        assert!(SbiStrategy.can_handle("www.sbi.co.in"));
        assert!(SbiStrategy.can_handle("Corporate Internet Banking"));
        assert!(!SbiStrategy.can_handle("sbi"));
    }
}
