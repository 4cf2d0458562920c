//! passbook-finance: forecast input records, monthly aggregates and category breakdowns

pub mod breakdown;
pub mod forecast;

pub use breakdown::{category_breakdown, CategoryTotal};
pub use forecast::{
    monthly_totals, period_totals, to_forecast_records, ForecastRecord, MonthlyTotals, PeriodTotals,
};
