//! Loaders for already-decoded statement content.
//!
//! PDF and spreadsheet decoding happen elsewhere; these read what the
//! decoders hand over: a CSV grid, a JSON `StatementDocument`, or plain text.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::types::{RawRow, StatementDocument, Table};

/// Read a headerless CSV grid from any reader. Rows may be ragged.
pub fn read_csv_grid_from(reader: impl Read) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.context("reading CSV record")?;
        let row: RawRow = record
            .iter()
            .map(|cell| if cell.is_empty() { None } else { Some(cell.to_string()) })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Read a headerless CSV grid from a file
pub fn read_csv_grid(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_csv_grid_from(file).with_context(|| format!("parsing {}", path.display()))
}

impl StatementDocument {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("decoding statement document JSON")
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_json_str(&s).with_context(|| format!("in {}", path.display()))
    }
}

/// Read extracted page text
pub fn read_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Decoded input, classified by file extension
#[derive(Debug, Clone, PartialEq)]
pub enum StatementInput {
    /// `.csv`: a single spreadsheet-style grid
    Grid(Table),
    /// `.json`: tables plus page text
    Document(StatementDocument),
    /// anything else: raw page text
    Text(String),
}

impl StatementInput {
    /// Page text, where the input carries any
    pub fn text(&self) -> &str {
        match self {
            StatementInput::Grid(_) => "",
            StatementInput::Document(doc) => &doc.text,
            StatementInput::Text(text) => text,
        }
    }
}

/// Load a file as a grid, document, or text according to its extension
pub fn load_input(path: impl AsRef<Path>) -> Result<StatementInput> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => Ok(StatementInput::Grid(read_csv_grid(path)?)),
        "json" => Ok(StatementInput::Document(StatementDocument::from_json_path(path)?)),
        _ => Ok(StatementInput::Text(read_text(path)?)),
    }
}
