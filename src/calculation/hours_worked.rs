//! Hours worked between a clock-in and a clock-out.

use std::fmt;

use chrono::NaiveTime;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::parse_hhmm;

/// Hours worked in one attendance session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoursWorked {
    /// Hours rounded to one decimal place.
    Hours(Decimal),
    /// Not computable: the session is open, a time is malformed, or the
    /// clock-out precedes the clock-in.
    Unavailable,
}

impl HoursWorked {
    /// The hour count, if available.
    pub fn hours(self) -> Option<Decimal> {
        match self {
            HoursWorked::Hours(hours) => Some(hours),
            HoursWorked::Unavailable => None,
        }
    }
}

impl fmt::Display for HoursWorked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoursWorked::Hours(hours) => write!(f, "{hours:.1} hrs"),
            HoursWorked::Unavailable => f.write_str("--"),
        }
    }
}

/// Computes hours between two `HH:MM` strings.
///
/// # Examples
///
/// ```
/// use hr_core::calculation::{HoursWorked, hours_worked};
///
/// assert_eq!(hours_worked("09:00", "17:30").to_string(), "8.5 hrs");
/// assert_eq!(hours_worked("17:00", "09:00"), HoursWorked::Unavailable);
/// assert_eq!(hours_worked("09:00", "--:--"), HoursWorked::Unavailable);
/// ```
pub fn hours_worked(clock_in: &str, clock_out: &str) -> HoursWorked {
    match (parse_hhmm(clock_in), parse_hhmm(clock_out)) {
        (Some(start), Some(end)) => hours_between(start, end),
        _ => HoursWorked::Unavailable,
    }
}

/// Computes hours between two times of day on the same date.
///
/// A clock-out before the clock-in is treated as invalid, not negative.
pub fn hours_between(clock_in: NaiveTime, clock_out: NaiveTime) -> HoursWorked {
    let minutes = (clock_out - clock_in).num_minutes();
    if minutes < 0 {
        return HoursWorked::Unavailable;
    }
    let hours = Decimal::from(minutes) / Decimal::from(60);
    HoursWorked::Hours(hours.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}
