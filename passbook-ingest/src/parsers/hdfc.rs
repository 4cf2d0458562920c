//! HDFC Bank statements (not yet supported).

use passbook_core::Transaction;
use tracing::warn;

use super::StatementStrategy;
use crate::types::{ParseOptions, Table};

const INDICATORS: &[&str] = &["hdfc bank", "HDFC BANK", "hdfcbank.com", "HDFC Bank Limited"];

#[derive(Debug, Clone, Copy, Default)]
pub struct HdfcStrategy;

impl StatementStrategy for HdfcStrategy {
    fn bank_name(&self) -> &'static str {
        "HDFC Bank"
    }

    fn indicators(&self) -> &'static [&'static str] {
        INDICATORS
    }

    fn parse(&self, _text: &str, tables: &[Table], _opts: &ParseOptions) -> Vec<Transaction> {
        warn!(bank = self.bank_name(), tables = tables.len(), "no parser for this bank yet");
        Vec::new()
    }
}
