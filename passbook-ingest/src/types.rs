use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One document row as supplied by the decoder; cells may be null.
pub type RawRow = Vec<Option<String>>;

/// A table is an ordered list of rows.
pub type Table = Vec<RawRow>;

/// Decoder output for one statement: every table plus the concatenated page text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementDocument {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub text: String,
}

/// Known column orderings of a transaction row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutVariant {
    /// `[date, amount, direction, description]`
    FourColumnCsv,
    /// `[date, description, amount, direction, category]`
    FiveColumnCsv,
    /// `[date, date, credit, debit, balance, description]`, leading date optional
    FiveColumnLegacy,
    /// `[value date, post date, credit, debit, balance, description]`
    SixColumnDualDate,
    /// `[date, remarks, id1, id2, id3, withdrawal, deposit, balance]`
    EightColumnExtended,
    /// A line of page text matched by the regex fallback
    FreeTextLine,
}

impl LayoutVariant {
    /// Description length cap before the "..." marker
    pub fn description_limit(&self) -> usize {
        match self {
            LayoutVariant::SixColumnDualDate | LayoutVariant::EightColumnExtended => 150,
            _ => 100,
        }
    }
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LayoutVariant::FourColumnCsv => "csv-4",
            LayoutVariant::FiveColumnCsv => "csv-5",
            LayoutVariant::FiveColumnLegacy => "legacy-5",
            LayoutVariant::SixColumnDualDate => "dual-date-6",
            LayoutVariant::EightColumnExtended => "extended-8",
            LayoutVariant::FreeTextLine => "free-text",
        };
        f.write_str(s)
    }
}

/// Per-call parse settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Substituted for dates that cannot be parsed
    pub today: NaiveDate,
    /// Run the regex pass over page text when tables yield nothing
    pub text_fallback: bool,
}

impl ParseOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            text_fallback: true,
        }
    }

    pub fn with_text_fallback(mut self, enabled: bool) -> Self {
        self.text_fallback = enabled;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}
