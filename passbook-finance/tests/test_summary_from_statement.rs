use chrono::NaiveDate;
use passbook_core::Direction;
use passbook_finance::{category_breakdown, monthly_totals, period_totals, to_forecast_records};
use passbook_ingest::{ParseOptions, RawRow, StatementParser};
use pretty_assertions::assert_eq;

fn raw(cells: &[&str]) -> RawRow {
    cells
        .iter()
        .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
        .collect()
}

fn statement() -> Vec<Vec<RawRow>> {
    vec![vec![
        raw(&["Value Date", "Post Date", "Credit", "Debit", "Balance", "Description"]),
        raw(&["01/01/2024", "01/01/2024", "50,000.00", "", "60000.00", "SALARY JAN ACME"]),
        raw(&["03/01/2024", "03/01/2024", "", "12,000.00", "48000.00", "NEFT RENT"]),
        raw(&["05/01/2024", "05/01/2024", "", "640.50", "47359.50", "UPI/PHONEPE/groceries"]),
        raw(&["01/02/2024", "01/02/2024", "50,000.00", "", "97359.50", "SALARY FEB ACME"]),
        raw(&["03/02/2024", "03/02/2024", "", "12,000.00", "85359.50", "NEFT RENT"]),
        raw(&["09/02/2024", "09/02/2024", "", "2,000.00", "83359.50", "ATM CWD"]),
        raw(&["29/02/2024", "29/02/2024", "", "59.00", "83300.50", "SMS CHARGES"]),
    ]]
}

#[test]
fn monthly_forecast_input_from_parsed_statement() {
    let opts = ParseOptions::new(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    let txns = StatementParser::new(opts).parse(&statement(), "");
    assert_eq!(txns.len(), 7);

    let records = to_forecast_records(&txns);
    let months = monthly_totals(&records);

    let rows: Vec<(&str, f64, f64, f64)> = months
        .iter()
        .map(|m| (m.month.as_str(), m.income, m.expense, m.savings))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("2024-01", 50000.0, 12640.5, 37359.5),
            ("2024-02", 50000.0, 14059.0, 35941.0),
        ]
    );

    let period = period_totals(&txns);
    assert_eq!(period.net_savings, 73300.5);
}

#[test]
fn category_breakdown_from_parsed_statement() {
    let opts = ParseOptions::new(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    let txns = StatementParser::new(opts).parse(&statement(), "");

    let spend = category_breakdown(&txns, Direction::Debit);
    let labels: Vec<(&str, f64, usize)> = spend
        .iter()
        .map(|c| (c.category.as_str(), c.total, c.count))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("Transfer", 24000.0, 2),
            ("Cash Withdrawal", 2000.0, 1),
            ("Digital Payment", 640.5, 1),
            ("Bank Charges", 59.0, 1),
        ]
    );

    let income = category_breakdown(&txns, Direction::Credit);
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].category, "Salary");
}
