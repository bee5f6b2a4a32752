//! Monthly attendance rate.
//!
//! The rate is the number of distinct days in the current month with at
//! least one attendance log, divided by the days elapsed so far in the
//! month. Weekends and holidays count as working days.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::models::AttendanceLog;

/// Attendance percentage for the month containing `today`.
///
/// Days elapsed is `today`'s day of the month, so the 12th divides by 12.
///
/// # Examples
///
/// ```
/// use hr_core::calculation::attendance_rate;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 2, 12).unwrap();
/// assert_eq!(attendance_rate(&[], today), 0);
/// ```
pub fn attendance_rate(logs: &[AttendanceLog], today: NaiveDate) -> u32 {
    let days_present: BTreeSet<NaiveDate> = logs
        .iter()
        .map(|log| log.date)
        .filter(|date| date.year() == today.year() && date.month() == today.month())
        .collect();

    rate_percent(days_present.len() as u32, today.day())
}

/// Rounded percentage of `days_present` over `days_elapsed`.
///
/// The divisor is never less than one. Halves round up.
pub fn rate_percent(days_present: u32, days_elapsed: u32) -> u32 {
    let days_elapsed = u64::from(days_elapsed.max(1));
    let scaled = u64::from(days_present) * 200 + days_elapsed;
    (scaled / (2 * days_elapsed)) as u32
}
