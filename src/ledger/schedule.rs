//! Due-date arithmetic for monthly obligations.

use chrono::{Datelike, Duration, NaiveDate};

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}

/// Due date within the same month as `reference`, with the nominal day
/// clamped to the month's length. A due day of 31 lands on the 28th, 29th
/// or 30th in shorter months and never rolls into the following month.
pub fn resolve_due_date(reference: NaiveDate, due_day: u32) -> NaiveDate {
    let day = due_day.clamp(1, days_in_month(reference.year(), reference.month()));
    NaiveDate::from_ymd_opt(reference.year(), reference.month(), day).unwrap()
}

/// Advances `reference` by exactly one calendar month, then clamps the
/// nominal due day against the new month's length.
pub fn next_cycle(reference: NaiveDate, due_day: u32) -> NaiveDate {
    let mut year = reference.year();
    let mut month = reference.month() + 1;
    if month > 12 {
        month = 1;
        year += 1;
    }
    let day = due_day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
