//! Forecast input contract: per-transaction records and calendar-month
//! aggregates, handed to an external forecasting model.

use chrono::{Datelike, NaiveDate};
use passbook_core::{round_cents, Direction, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The minimal projection a forecaster consumes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastRecord {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub amount: f64,
}

impl From<&Transaction> for ForecastRecord {
    fn from(txn: &Transaction) -> Self {
        Self {
            date: txn.date,
            direction: txn.direction,
            amount: txn.amount,
        }
    }
}

pub fn to_forecast_records(txns: &[Transaction]) -> Vec<ForecastRecord> {
    txns.iter().map(ForecastRecord::from).collect()
}

/// Income and expense for one calendar month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTotals {
    /// `YYYY-MM`
    pub month: String,
    pub income: f64,
    pub expense: f64,
    /// income - expense; negative in a deficit month
    pub savings: f64,
    /// 1..=12
    pub month_of_year: u32,
    pub year: i32,
}

/// Group by calendar month, ascending. Months without transactions are absent.
pub fn monthly_totals<'a, I>(records: I) -> Vec<MonthlyTotals>
where
    I: IntoIterator<Item = &'a ForecastRecord>,
{
    // (year, month) -> (income, expense)
    let mut groups: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();

    for r in records {
        let entry = groups.entry((r.date.year(), r.date.month())).or_default();
        match r.direction {
            Direction::Credit => entry.0 += r.amount,
            Direction::Debit => entry.1 += r.amount,
        }
    }

    groups
        .into_iter()
        .map(|((year, month), (income, expense))| MonthlyTotals {
            month: format!("{year:04}-{month:02}"),
            income: round_cents(income),
            expense: round_cents(expense),
            savings: round_cents(income - expense),
            month_of_year: month,
            year,
        })
        .collect()
}

/// Whole-period totals
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PeriodTotals {
    pub income: f64,
    pub expense: f64,
    pub net_savings: f64,
    /// Percent of income kept; 0 when there is no income
    pub savings_rate: f64,
}

pub fn period_totals(txns: &[Transaction]) -> PeriodTotals {
    let income: f64 = txns.iter().filter(|t| t.is_credit()).map(|t| t.amount).sum();
    let expense: f64 = txns.iter().filter(|t| t.is_debit()).map(|t| t.amount).sum();
    let net = income - expense;

    PeriodTotals {
        income: round_cents(income),
        expense: round_cents(expense),
        net_savings: round_cents(net),
        savings_rate: if income > 0.0 { round_cents(net / income * 100.0) } else { 0.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(y: i32, m: u32, d: u32, amount: f64, direction: Direction) -> Transaction {
        Transaction::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), "x", amount, direction, "Others")
    }

    #[test]
    fn test_record_wire_shape() {
        let r = ForecastRecord::from(&txn(2024, 1, 15, 500.0, Direction::Debit));
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v, serde_json::json!({"date": "2024-01-15", "type": "debit", "amount": 500.0}));
    }

    #[test]
    fn test_monthly_grouping_sorted() {
        let txns = vec![
            txn(2024, 2, 1, 100.0, Direction::Debit),
            txn(2024, 1, 31, 5000.0, Direction::Credit),
            txn(2024, 1, 2, 1200.5, Direction::Debit),
            txn(2023, 12, 25, 300.0, Direction::Debit),
        ];
        let months = monthly_totals(&to_forecast_records(&txns));

        let keys: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(keys, vec!["2023-12", "2024-01", "2024-02"]);

        let jan = &months[1];
        assert_eq!(jan.income, 5000.0);
        assert_eq!(jan.expense, 1200.5);
        assert_eq!(jan.savings, 3799.5);
        assert_eq!((jan.year, jan.month_of_year), (2024, 1));

        assert_eq!(months[0].savings, -300.0);
    }

    #[test]
    fn test_empty() {
        assert!(monthly_totals(&Vec::<ForecastRecord>::new()).is_empty());
        assert_eq!(period_totals(&[]), PeriodTotals::default());
    }

    #[test]
    fn test_period_totals() {
        let txns = vec![
            txn(2024, 1, 1, 1000.0, Direction::Credit),
            txn(2024, 1, 2, 250.0, Direction::Debit),
        ];
        let p = period_totals(&txns);
        assert_eq!(p.net_savings, 750.0);
        assert_eq!(p.savings_rate, 75.0);

        let deficit = period_totals(&txns[1..]);
        assert_eq!(deficit.savings_rate, 0.0);
        assert_eq!(deficit.net_savings, -250.0);
    }
}
