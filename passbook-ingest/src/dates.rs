//! Date normalization to canonical `YYYY-MM-DD`.
//!
//! Statements are day-first (Indian convention) unless the year leads.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::cells::normalize_date_text;

static DAY_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<d>\d{1,2})(?P<s1>[/-])(?P<m>\d{1,2})(?P<s2>[/-])(?P<y>\d{2,4})(?:\s|$)")
        .expect("static pattern")
});

static YEAR_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<y>\d{4})(?P<s1>[/-])(?P<m>\d{1,2})(?P<s2>[/-])(?P<d>\d{1,2})(?:\s|$)")
        .expect("static pattern")
});

static MONTH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<d>\d{1,2})\s*(?P<mon>[A-Za-z]{3,})\s*(?P<y>\d{4})$").expect("static pattern")
});

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Month number for a name; only the first three letters count.
pub fn month_from_name(name: &str) -> Option<u32> {
    let key: String = name.chars().take(3).collect::<String>().to_lowercase();
    MONTHS.iter().position(|m| *m == key).map(|i| i as u32 + 1)
}

/// Expand two-digit years into the 2000s.
fn expand_year(y: &str) -> Option<i32> {
    let year: i32 = y.parse().ok()?;
    if y.len() == 2 { Some(2000 + year) } else { Some(year) }
}

/// Parse any recognized date form, ignoring a trailing timestamp.
/// Returns `None` for unrecognized text or impossible calendar dates.
pub fn normalize_date(text: &str) -> Option<NaiveDate> {
    let cleaned = normalize_date_text(text);

    for re in [&*DAY_FIRST, &*YEAR_FIRST] {
        if let Some(caps) = re.captures(&cleaned) {
            // "15/01-2024" is not a date
            if caps["s1"] != caps["s2"] {
                return None;
            }
            let year = expand_year(&caps["y"])?;
            let month: u32 = caps["m"].parse().ok()?;
            let day: u32 = caps["d"].parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, day);
        }
    }

    if let Some(caps) = MONTH_NAME.captures(&cleaned) {
        let month = month_from_name(&caps["mon"])?;
        let year: i32 = caps["y"].parse().ok()?;
        let day: u32 = caps["d"].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

/// Outcome of resolving a date cell against the processing date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    /// True when `date` is the processing date standing in for bad input
    pub substituted: bool,
}

/// Parse `text`, falling back to `today` when it cannot be parsed.
pub fn resolve_date(text: &str, today: NaiveDate) -> ResolvedDate {
    match normalize_date(text) {
        Some(date) => ResolvedDate {
            date,
            substituted: false,
        },
        None => {
            warn!(input = %text, fallback = %today, "unparseable date, using processing date");
            ResolvedDate {
                date: today,
                substituted: true,
            }
        }
    }
}

/// Canonical `YYYY-MM-DD` text for a date cell; `today` on failure.
pub fn format_date(text: &str, today: NaiveDate) -> String {
    resolve_date(text, today).date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_day_first_forms() {
        assert_eq!(format_date("15/01/2024", today()), "2024-01-15");
        assert_eq!(format_date("05-01-24", today()), "2024-01-05");
        assert_eq!(format_date("5/1/2024", today()), "2024-01-05");
        assert_eq!(format_date("15/01/2024 10:30:00", today()), "2024-01-15");
        assert_eq!(format_date("15 - 01 - 2024", today()), "2024-01-15");
    }

    #[test]
    fn test_month_name_forms() {
        assert_eq!(format_date("15 Jan 2024", today()), "2024-01-15");
        assert_eq!(format_date("3DEC2023", today()), "2023-12-03");
        assert_eq!(format_date("07 September 2024", today()), "2024-09-07");
        assert_eq!(month_from_name("Sept"), Some(9));
        assert_eq!(month_from_name("Foo"), None);
    }

    #[test]
    fn test_iso_forms() {
        assert_eq!(format_date("2024-01-15", today()), "2024-01-15");
        assert_eq!(format_date("2024/1/5 09:15", today()), "2024-01-05");
    }

    #[test]
    fn test_sentinel_on_garbage() {
        for s in ["", "yesterday", "31/02/2024", "15/01-2024", "15 Foo 2024"] {
            let r = resolve_date(s, today());
            assert!(r.substituted, "{s} should fall back");
            assert_eq!(r.date, today());
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(format_date("01/02/2024", today()), format_date("01/02/2024", today()));
        // Day-first, not month-first
        assert_eq!(format_date("01/02/2024", today()), "2024-02-01");
    }
}
