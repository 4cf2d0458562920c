//! Layout detection for cleaned table rows.
//!
//! Rules are tried in order, most specific first. Column count is checked
//! before cell content so layouts sharing a width don't collide.

use crate::cells::{is_amount, is_date, is_direction_tag, is_empty_or_amount, non_empty_count};
use crate::types::LayoutVariant;

/// Rows with fewer non-empty cells than this are noise
pub const MIN_NON_EMPTY_CELLS: usize = 3;

/// One step of the detection cascade
pub struct LayoutRule {
    pub variant: LayoutVariant,
    pub accepts: fn(&[String]) -> bool,
}

fn cell(cells: &[String], i: usize) -> &str {
    cells.get(i).map(String::as_str).unwrap_or("")
}

fn extended_8(cells: &[String]) -> bool {
    cells.len() >= 8
}

fn dual_date_6(cells: &[String]) -> bool {
    (6..=7).contains(&cells.len())
        && is_date(cell(cells, 0))
        && is_date(cell(cells, 1))
        && is_empty_or_amount(cell(cells, 2))
        && is_empty_or_amount(cell(cells, 3))
}

// A 6-7 column row that failed the dual-date test still gets a legacy attempt
fn legacy_6_or_7(cells: &[String]) -> bool {
    (6..=7).contains(&cells.len())
}

fn csv_5(cells: &[String]) -> bool {
    cells.len() == 5
        && is_date(cell(cells, 0))
        && is_amount(cell(cells, 2))
        && is_direction_tag(cell(cells, 3))
}

fn legacy_5(cells: &[String]) -> bool {
    cells.len() == 5
}

fn csv_4(cells: &[String]) -> bool {
    cells.len() == 4
        && is_date(cell(cells, 0))
        && is_amount(cell(cells, 1))
        && is_direction_tag(cell(cells, 2))
}

/// The detection cascade, in priority order
pub const LAYOUT_RULES: &[LayoutRule] = &[
    LayoutRule { variant: LayoutVariant::EightColumnExtended, accepts: extended_8 },
    LayoutRule { variant: LayoutVariant::SixColumnDualDate, accepts: dual_date_6 },
    LayoutRule { variant: LayoutVariant::FiveColumnLegacy, accepts: legacy_6_or_7 },
    LayoutRule { variant: LayoutVariant::FiveColumnCsv, accepts: csv_5 },
    LayoutRule { variant: LayoutVariant::FiveColumnLegacy, accepts: legacy_5 },
    LayoutRule { variant: LayoutVariant::FourColumnCsv, accepts: csv_4 },
];

/// Pick the layout of a cleaned row, or `None` if nothing fits.
pub fn detect_layout(cells: &[String]) -> Option<LayoutVariant> {
    if non_empty_count(cells) < MIN_NON_EMPTY_CELLS {
        return None;
    }

    LAYOUT_RULES
        .iter()
        .find(|rule| (rule.accepts)(cells))
        .map(|rule| rule.variant)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_too_sparse() {
        assert_eq!(detect_layout(&row(&["15/01/2024", "", "", "", "", "500.00"])), None);
        assert_eq!(detect_layout(&row(&[])), None);
    }

    #[test]
    fn test_eight_or_more() {
        let r = row(&["15/01/2024", "Salary Credit", "", "", "", "", "5000.00", "15000.00"]);
        assert_eq!(detect_layout(&r), Some(LayoutVariant::EightColumnExtended));
        let mut wide = r.clone();
        wide.push("extra".into());
        assert_eq!(detect_layout(&wide), Some(LayoutVariant::EightColumnExtended));
    }

    #[test]
    fn test_six_dual_date() {
        let r = row(&["15/01/2024", "15/01/2024", "", "500.00", "10500.00", "Grocery Store"]);
        assert_eq!(detect_layout(&r), Some(LayoutVariant::SixColumnDualDate));
    }

    #[test]
    fn test_seven_columns() {
        let dual = row(&["15/01/2024", "15/01/2024", "", "500.00", "10500.00", "Grocery Store", "CHQ 0012"]);
        assert_eq!(detect_layout(&dual), Some(LayoutVariant::SixColumnDualDate));

        let degraded = row(&["", "15/01/2024", "250.00", "", "10750.00", "Refund", "CHQ 0013"]);
        assert_eq!(detect_layout(&degraded), Some(LayoutVariant::FiveColumnLegacy));
    }

    #[test]
    fn test_six_degrades_to_legacy() {
        // Leading date missing: dual-date test fails, legacy still gets a shot
        let r = row(&["", "15/01/2024", "250.00", "", "10750.00", "Refund"]);
        assert_eq!(detect_layout(&r), Some(LayoutVariant::FiveColumnLegacy));
    }

    #[test]
    fn test_five_columns() {
        let tagged = row(&["15/01/2024", "Coffee", "120.00", "Debit", "Food"]);
        assert_eq!(detect_layout(&tagged), Some(LayoutVariant::FiveColumnCsv));

        let legacy = row(&["15/01/2024", "15/01/2024", "", "120.00", "Coffee"]);
        assert_eq!(detect_layout(&legacy), Some(LayoutVariant::FiveColumnLegacy));
    }

    #[test]
    fn test_four_columns() {
        let r = row(&["15/01/2024", "120.00", "credit", "Refund"]);
        assert_eq!(detect_layout(&r), Some(LayoutVariant::FourColumnCsv));

        let untagged = row(&["15/01/2024", "120.00", "sent", "Refund"]);
        assert_eq!(detect_layout(&untagged), None);
    }

    #[test]
    fn test_three_columns_unrecognized() {
        assert_eq!(detect_layout(&row(&["15/01/2024", "Coffee", "120.00"])), None);
    }
}
