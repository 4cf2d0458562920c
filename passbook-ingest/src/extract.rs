//! Per-layout row extraction.
//!
//! Each extractor reads a cleaned row at the positions its layout defines.
//! Missing cells read as empty, so a short or ragged row is rejected rather
//! than panicking.

use passbook_core::{categorize, Direction, Transaction, TransactionWarning};
use thiserror::Error;

use crate::cells::{is_date, parse_amount, truncate_description};
use crate::dates::resolve_date;
use crate::types::{LayoutVariant, ParseOptions};

/// Used when the narrative column is empty
pub const PLACEHOLDER_DESCRIPTION: &str = "Transaction";

/// Why a row produced no transaction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("fewer than 3 non-empty cells")]
    TooFewCells,
    #[error("no layout matches {columns} columns")]
    UnrecognizedLayout { columns: usize },
    #[error("no date at column {column}")]
    MissingDate { column: usize },
    #[error("neither flow column holds a positive amount")]
    NoFlowAmount,
    #[error("column {column} is not an amount")]
    InvalidAmount { column: usize },
    #[error("amount is zero")]
    ZeroAmount,
    #[error("layout {0} is not extracted from table rows")]
    NotTabular(LayoutVariant),
}

impl Rejection {
    /// Short stable label, used as a report key
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::TooFewCells => "too-few-cells",
            Rejection::UnrecognizedLayout { .. } => "unrecognized-layout",
            Rejection::MissingDate { .. } => "missing-date",
            Rejection::NoFlowAmount => "no-flow-amount",
            Rejection::InvalidAmount { .. } => "invalid-amount",
            Rejection::ZeroAmount => "zero-amount",
            Rejection::NotTabular(_) => "not-tabular",
        }
    }
}

/// Where a layout keeps its fields
struct FlowColumns {
    date: usize,
    credit: usize,
    debit: usize,
}

fn cell(cells: &[String], i: usize) -> &str {
    cells.get(i).map(String::as_str).unwrap_or("")
}

/// Value of a flow column if it parses strictly positive
fn positive_amount(cells: &[String], i: usize) -> Option<f64> {
    parse_amount(cell(cells, i)).filter(|v| *v > 0.0)
}

/// Credit wins if both are populated; a row needs one positive flow.
fn pick_flow(cells: &[String], cols: &FlowColumns) -> Result<(f64, Direction), Rejection> {
    if let Some(v) = positive_amount(cells, cols.credit) {
        return Ok((v, Direction::Credit));
    }
    if let Some(v) = positive_amount(cells, cols.debit) {
        return Ok((v, Direction::Debit));
    }
    Err(Rejection::NoFlowAmount)
}

/// Flatten, trim, cap, and default the narrative text
pub fn clean_description(raw: &str, limit: usize) -> String {
    let flat = raw.replace(['\r', '\n'], " ");
    let trimmed = flat.trim();
    if trimmed.is_empty() {
        return PLACEHOLDER_DESCRIPTION.to_string();
    }
    truncate_description(trimmed, limit)
}

fn build(
    date_text: &str,
    description: &str,
    amount: f64,
    direction: Direction,
    category: Option<&str>,
    variant: LayoutVariant,
    opts: &ParseOptions,
) -> Transaction {
    let resolved = resolve_date(date_text, opts.today);
    let description = clean_description(description, variant.description_limit());
    let category = match category.map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => c.to_string(),
        None => categorize(&description).to_string(),
    };

    let txn = Transaction::new(resolved.date, description, amount, direction, category);
    if resolved.substituted {
        txn.with_warning(TransactionWarning::DateSubstituted)
    } else {
        txn
    }
}

/// Flow-column layouts: legacy, dual-date, extended
fn extract_flow_row(
    cells: &[String],
    variant: LayoutVariant,
    cols: FlowColumns,
    description: &str,
    opts: &ParseOptions,
) -> Result<Transaction, Rejection> {
    let date_text = cell(cells, cols.date);
    if !is_date(date_text) {
        return Err(Rejection::MissingDate { column: cols.date });
    }
    let (amount, direction) = pick_flow(cells, &cols)?;
    Ok(build(date_text, description, amount, direction, None, variant, opts))
}

/// Tagged CSV layouts: one signed amount column plus a credit/debit tag
fn extract_tagged_row(
    cells: &[String],
    variant: LayoutVariant,
    amount_col: usize,
    tag_col: usize,
    description: &str,
    category: Option<&str>,
    opts: &ParseOptions,
) -> Result<Transaction, Rejection> {
    let date_text = cell(cells, 0);
    if !is_date(date_text) {
        return Err(Rejection::MissingDate { column: 0 });
    }
    let amount = parse_amount(cell(cells, amount_col))
        .ok_or(Rejection::InvalidAmount { column: amount_col })?
        .abs();
    if amount == 0.0 {
        return Err(Rejection::ZeroAmount);
    }
    let direction = match Direction::from_tag(cell(cells, tag_col)) {
        Some(d) => d,
        // Untagged: the sign decides
        None if parse_amount(cell(cells, amount_col)).is_some_and(|v| v < 0.0) => Direction::Debit,
        None => Direction::Credit,
    };
    Ok(build(date_text, description, amount, direction, category, variant, opts))
}

/// Extract a transaction from a cleaned row in the given layout.
pub fn extract_row(
    cells: &[String],
    variant: LayoutVariant,
    opts: &ParseOptions,
) -> Result<Transaction, Rejection> {
    match variant {
        LayoutVariant::EightColumnExtended => extract_flow_row(
            cells,
            variant,
            FlowColumns { date: 0, credit: 6, debit: 5 },
            cell(cells, 1),
            opts,
        ),

        LayoutVariant::SixColumnDualDate => extract_flow_row(
            cells,
            variant,
            FlowColumns { date: 0, credit: 2, debit: 3 },
            cell(cells, 5),
            opts,
        ),

        LayoutVariant::FiveColumnLegacy => {
            // Leading date may be blank; fall back to the second date column
            let date = if cell(cells, 0).is_empty() { 1 } else { 0 };
            let description = if cells.len() > 5 {
                cell(cells, 5)
            } else {
                cell(cells, 4)
            };
            extract_flow_row(
                cells,
                variant,
                FlowColumns { date, credit: 2, debit: 3 },
                description,
                opts,
            )
        }

        LayoutVariant::FiveColumnCsv => {
            extract_tagged_row(cells, variant, 2, 3, cell(cells, 1), Some(cell(cells, 4)), opts)
        }

        LayoutVariant::FourColumnCsv => {
            extract_tagged_row(cells, variant, 1, 2, cell(cells, 3), None, opts)
        }

        LayoutVariant::FreeTextLine => Err(Rejection::NotTabular(variant)),
    }
}
