//! Bank-specific statement strategies, chosen by signature phrases in the
//! document text.
//!
//! Strategies are tried in order; the first whose `can_handle` matches wins.
//! When none match, the fallback strategy (Indian Bank) is used.

pub mod hdfc;
pub mod indian_bank;
pub mod sbi;

use passbook_core::{mark_recurring, Transaction};
use tracing::info;

use crate::types::{ParseOptions, Table};

pub use hdfc::HdfcStrategy;
pub use indian_bank::IndianBankStrategy;
pub use sbi::SbiStrategy;

/// A parser for one bank's statement format
pub trait StatementStrategy {
    /// Display name, e.g. "Indian Bank"
    fn bank_name(&self) -> &'static str;

    /// Signature phrases, matched case-sensitively against the document text
    fn indicators(&self) -> &'static [&'static str];

    fn can_handle(&self, text: &str) -> bool {
        self.indicators().iter().any(|needle| text.contains(needle))
    }

    fn parse(&self, text: &str, tables: &[Table], opts: &ParseOptions) -> Vec<Transaction>;
}

/// Ordered strategy list with a designated fallback
pub struct BankSignatureMatcher {
    strategies: Vec<Box<dyn StatementStrategy>>,
    fallback: Box<dyn StatementStrategy>,
}

impl BankSignatureMatcher {
    pub fn new(
        strategies: Vec<Box<dyn StatementStrategy>>,
        fallback: Box<dyn StatementStrategy>,
    ) -> Self {
        Self {
            strategies,
            fallback,
        }
    }

    /// Pick the strategy for a document
    pub fn select(&self, text: &str) -> &dyn StatementStrategy {
        self.strategies
            .iter()
            .find(|s| s.can_handle(text))
            .map(|s| &**s)
            .unwrap_or(&*self.fallback)
    }

    /// Name of the bank a document would be dispatched to
    pub fn detect_bank(&self, text: &str) -> &'static str {
        self.select(text).bank_name()
    }

    pub fn parse(&self, text: &str, tables: &[Table], opts: &ParseOptions) -> Vec<Transaction> {
        let strategy = self.select(text);
        info!(bank = strategy.bank_name(), "dispatching statement by signature");

        let mut txns = strategy.parse(text, tables, opts);
        mark_recurring(&mut txns);
        txns
    }
}

impl Default for BankSignatureMatcher {
    fn default() -> Self {
        Self::new(
            vec![
                Box::new(IndianBankStrategy),
                Box::new(SbiStrategy),
                Box::new(HdfcStrategy),
            ],
            Box::new(IndianBankStrategy),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn opts() -> ParseOptions {
        ParseOptions::new(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    #[test]
    fn test_select_by_signature() {
        let m = BankSignatureMatcher::default();
        assert_eq!(m.detect_bank("INDIAN BANK\nStatement"), "Indian Bank");
        assert_eq!(m.detect_bank("STATE BANK OF INDIA branch"), "State Bank of India");
        assert_eq!(m.detect_bank("Welcome to HDFC BANK"), "HDFC Bank");
    }

    #[test]
    fn test_first_match_wins() {
        // Both Indian Bank and SBI phrases present: Indian Bank is listed first
        let m = BankSignatureMatcher::default();
        assert_eq!(m.detect_bank("Account Statement - SBI"), "Indian Bank");
    }

    #[test]
    fn test_fallback_when_unmatched() {
        let m = BankSignatureMatcher::default();
        assert_eq!(m.detect_bank("Some Credit Union"), "Indian Bank");
        // Signatures are case-sensitive
        assert_eq!(m.detect_bank("hdfc"), "Indian Bank");
    }

    #[test]
    fn test_unimplemented_banks_return_empty() {
        let m = BankSignatureMatcher::default();
        let text = "HDFC BANK\n15/01/2024 Grocery Store 500.00";
        assert!(m.parse(text, &[], &opts()).is_empty());
    }

    #[test]
    fn test_fallback_parses_text() {
        let m = BankSignatureMatcher::default();
        let text = "Unknown bank\n15/01/2024 Grocery Store 500.00\n16/02/2024 Grocery Store 500.00";
        let txns = m.parse(text, &[], &opts());
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].id, 1);
        assert_eq!(txns[1].id, 2);
    }
}
