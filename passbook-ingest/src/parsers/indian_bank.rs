//! Indian Bank statements: the generic table cascade with text fallback.

use passbook_core::Transaction;

use super::StatementStrategy;
use crate::statement::StatementParser;
use crate::types::{ParseOptions, Table};

const INDICATORS: &[&str] = &[
    "indian bank",
    "INDIAN BANK",
    "Indian Bank Ltd",
    "Account Statement",
    "Statement of Account",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct IndianBankStrategy;

impl StatementStrategy for IndianBankStrategy {
    fn bank_name(&self) -> &'static str {
        "Indian Bank"
    }

    fn indicators(&self) -> &'static [&'static str] {
        INDICATORS
    }

    fn parse(&self, text: &str, tables: &[Table], opts: &ParseOptions) -> Vec<Transaction> {
        StatementParser::new(*opts).parse(tables, text)
    }
}
