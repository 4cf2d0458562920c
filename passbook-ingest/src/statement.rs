//! Statement parsing orchestrator.
//!
//! tables -> header filter -> layout detection -> row extraction
//!        -> (text fallback if nothing parsed) -> dedup -> recurrence pass
//!
//! Nothing here returns an error: rows that fail are logged and counted in
//! the [`ParseReport`], and the worst case is an empty transaction list.

use passbook_core::{deduplicate, mark_recurring, Transaction};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::cells::{clean_row, is_date, non_empty_count};
use crate::detect::{detect_layout, MIN_NON_EMPTY_CELLS};
use crate::extract::{extract_row, Rejection};
use crate::text_fallback::extract_text;
use crate::types::{LayoutVariant, ParseOptions, RawRow, Table};

/// Keywords that mark a row as a column-heading row
pub const HEADER_KEYWORDS: &[&str] = &[
    "date",
    "particulars",
    "s.no",
    "sr.no",
    "transaction",
    "remarks",
    "description",
];

const GRID_DATE_HEADINGS: &[&str] = &["date", "transaction_date", "posting_date"];
const GRID_NARRATIVE_HEADINGS: &[&str] = &["description", "particulars", "reference", "remarks"];
const GRID_FLOW_HEADINGS: &[&str] = &["amount", "debit", "credit", "withdrawal", "deposit"];

/// True if the first non-empty cell names a column rather than holding data
pub fn is_header_row(cells: &[String]) -> bool {
    match cells.iter().find(|c| !c.is_empty()) {
        Some(first) => {
            let first = first.to_lowercase();
            HEADER_KEYWORDS.iter().any(|k| first.contains(k))
        }
        None => false,
    }
}

// Spreadsheet exports: a first row that doesn't open with a date, or that
// spells out date/narrative/flow headings, is a heading row.
fn is_grid_header_row(cells: &[String]) -> bool {
    let col = |i: usize| cells.get(i).map(|c| c.to_lowercase()).unwrap_or_default();
    let named = GRID_DATE_HEADINGS.contains(&col(0).as_str())
        && GRID_NARRATIVE_HEADINGS.contains(&col(1).as_str())
        && GRID_FLOW_HEADINGS.contains(&col(2).as_str());
    named || is_header_row(cells) || !is_date(&col(0))
}

/// What happened to one row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Header,
    Parsed {
        layout: LayoutVariant,
        transaction: Box<Transaction>,
    },
    Rejected {
        layout: Option<LayoutVariant>,
        reason: Rejection,
    },
}

/// Counters describing a parse run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseReport {
    pub tables: usize,
    pub rows: usize,
    pub header_rows: usize,
    pub extracted: usize,
    /// Rejections keyed by [`Rejection::kind`]
    pub rejected: BTreeMap<String, usize>,
    /// Rows parsed per layout, keyed by its display name
    pub layouts: BTreeMap<String, usize>,
    pub text_fallback_used: bool,
    pub text_fallback_extracted: usize,
    pub duplicates_removed: usize,
    pub low_confidence: usize,
}

impl ParseReport {
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }

    fn record(&mut self, outcome: &RowOutcome) {
        self.rows += 1;
        match outcome {
            RowOutcome::Header => self.header_rows += 1,
            RowOutcome::Parsed { layout, .. } => {
                self.extracted += 1;
                *self.layouts.entry(layout.to_string()).or_insert(0) += 1;
            }
            RowOutcome::Rejected { reason, .. } => {
                *self.rejected.entry(reason.kind().to_string()).or_insert(0) += 1;
            }
        }
    }
}

/// Transactions plus the report of how they were obtained
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub transactions: Vec<Transaction>,
    pub report: ParseReport,
}

/// Classify, detect and extract a single raw row.
pub fn process_row(row: &RawRow, opts: &ParseOptions) -> RowOutcome {
    let cells = clean_row(row);

    if is_header_row(&cells) {
        return RowOutcome::Header;
    }
    route_cells(&cells, opts)
}

fn route_cells(cells: &[String], opts: &ParseOptions) -> RowOutcome {
    if non_empty_count(cells) < MIN_NON_EMPTY_CELLS {
        return RowOutcome::Rejected {
            layout: None,
            reason: Rejection::TooFewCells,
        };
    }

    let Some(layout) = detect_layout(cells) else {
        return RowOutcome::Rejected {
            layout: None,
            reason: Rejection::UnrecognizedLayout {
                columns: cells.len(),
            },
        };
    };

    match extract_row(cells, layout, opts) {
        Ok(txn) => RowOutcome::Parsed {
            layout,
            transaction: Box::new(txn),
        },
        Err(reason) => RowOutcome::Rejected {
            layout: Some(layout),
            reason,
        },
    }
}

/// Layout-sniffing statement parser
#[derive(Debug, Clone, Copy)]
pub struct StatementParser {
    opts: ParseOptions,
}

impl StatementParser {
    pub fn new(opts: ParseOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.opts
    }

    /// Parse every table of a document, falling back to `text` when no row
    /// yields a transaction.
    pub fn parse(&self, tables: &[Table], text: &str) -> Vec<Transaction> {
        self.parse_with_report(tables, text).transactions
    }

    pub fn parse_with_report(&self, tables: &[Table], text: &str) -> ParseOutcome {
        let mut report = ParseReport {
            tables: tables.len(),
            ..Default::default()
        };
        let mut txns = Vec::new();

        for (t, table) in tables.iter().enumerate() {
            for (r, row) in table.iter().enumerate() {
                let outcome = process_row(row, &self.opts);
                self.trace_outcome(t, r, &outcome);
                report.record(&outcome);
                if let RowOutcome::Parsed { transaction, .. } = outcome {
                    txns.push(*transaction);
                }
            }
        }

        if txns.is_empty() && self.opts.text_fallback && !text.trim().is_empty() {
            txns = extract_text(text, &self.opts);
            report.text_fallback_used = true;
            report.text_fallback_extracted = txns.len();
            warn!(
                extracted = txns.len(),
                "no table rows parsed, used text fallback (directions assumed debit)"
            );
        }

        self.finish(txns, report)
    }

    /// Parse a spreadsheet/CSV grid. Only the first row is tested for
    /// headings, and there is no page text to fall back on.
    pub fn parse_grid(&self, rows: &[RawRow]) -> ParseOutcome {
        let mut report = ParseReport {
            tables: 1,
            ..Default::default()
        };
        let mut txns = Vec::new();

        for (r, row) in rows.iter().enumerate() {
            let cells = clean_row(row);
            let outcome = if r == 0 && is_grid_header_row(&cells) {
                RowOutcome::Header
            } else {
                route_cells(&cells, &self.opts)
            };
            self.trace_outcome(0, r, &outcome);
            report.record(&outcome);
            if let RowOutcome::Parsed { transaction, .. } = outcome {
                txns.push(*transaction);
            }
        }

        self.finish(txns, report)
    }

    fn finish(&self, txns: Vec<Transaction>, mut report: ParseReport) -> ParseOutcome {
        let before = txns.len();
        let mut transactions = deduplicate(txns);
        mark_recurring(&mut transactions);

        report.duplicates_removed = before - transactions.len();
        report.low_confidence = transactions.iter().filter(|t| t.is_low_confidence()).count();

        info!(
            tables = report.tables,
            rows = report.rows,
            headers = report.header_rows,
            extracted = report.extracted,
            rejected = report.rejected_total(),
            duplicates = report.duplicates_removed,
            fallback = report.text_fallback_used,
            "statement parsed"
        );

        ParseOutcome {
            transactions,
            report,
        }
    }

    fn trace_outcome(&self, table: usize, row: usize, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Header => debug!(table, row, "header row skipped"),
            RowOutcome::Parsed { layout, .. } => debug!(table, row, %layout, "row parsed"),
            RowOutcome::Rejected { layout, reason } => debug!(
                table,
                row,
                layout = ?layout,
                reason = %reason,
                "row rejected"
            ),
        }
    }
}

impl Default for StatementParser {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

/// Parse a decoded document with default options.
pub fn parse(tables: &[Table], text: &str) -> Vec<Transaction> {
    StatementParser::default().parse(tables, text)
}
