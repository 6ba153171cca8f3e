//! Calendar month arithmetic for payoff dates

use chrono::{Months, NaiveDate};

/// Add whole calendar months to a date.
///
/// Day-of-month is clamped to the end of shorter months (Jan 31 + 1 month is
/// Feb 28/29). Saturates at `NaiveDate::MAX`.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_months_rolls_year() {
        assert_eq!(add_months(ymd(2025, 11, 15), 3), ymd(2026, 2, 15));
        assert_eq!(add_months(ymd(2025, 1, 1), 360), ymd(2055, 1, 1));
    }

    #[test]
    fn test_add_zero_months() {
        assert_eq!(add_months(ymd(2025, 6, 30), 0), ymd(2025, 6, 30));
    }

    #[test]
    fn test_end_of_month_clamps() {
        assert_eq!(add_months(ymd(2025, 1, 31), 1), ymd(2025, 2, 28));
        assert_eq!(add_months(ymd(2024, 1, 31), 1), ymd(2024, 2, 29));
    }
}
