//! Calendar helpers

use chrono::NaiveDate;

/// Get the number of days in a month, or `None` for an invalid (year, month)
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;

    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}
