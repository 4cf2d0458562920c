//! passbook-ingest: bank statement rows and page text into normalized transactions.
//!
//! Two dispatch axes: per-row layout detection ([`statement`]) and per-document
//! bank signatures ([`parsers`]).

pub mod cells;
pub mod dates;
pub mod detect;
pub mod extract;
pub mod parsers;
pub mod sources;
pub mod statement;
pub mod text_fallback;
pub mod types;

pub use dates::{format_date, normalize_date};
pub use detect::detect_layout;
pub use extract::{extract_row, Rejection};
pub use parsers::{BankSignatureMatcher, StatementStrategy};
pub use sources::{load_input, read_csv_grid, StatementInput};
pub use statement::{parse, process_row, ParseOutcome, ParseReport, RowOutcome, StatementParser};
pub use types::{LayoutVariant, ParseOptions, RawRow, StatementDocument, Table};
