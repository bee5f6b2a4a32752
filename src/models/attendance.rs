//! Attendance log model and clock-in session state.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calculation::{HoursWorked, hours_between};

/// Persisted clock-out value of a log whose session is still open.
pub const OPEN_CLOCK_OUT: &str = "--:--";

/// Unique identifier of an attendance log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceId(pub u64);

impl fmt::Display for AttendanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Punctuality of a clock-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Clocked in no later than the configured start plus grace.
    #[serde(rename = "On Time")]
    OnTime,
    /// Clocked in after the configured start plus grace.
    Late,
}

/// One clock-in/clock-out session.
///
/// A log is open while `clock_out` is `None` (persisted as `--:--`)
/// and closed once a clock-out time is recorded. Closing is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceLog {
    /// Unique identifier.
    pub id: AttendanceId,
    /// Calendar day of the clock-in.
    pub date: NaiveDate,
    /// Clock-in time.
    #[serde(with = "super::hhmm")]
    pub clock_in: NaiveTime,
    /// Clock-out time, `None` while the session is open.
    #[serde(with = "super::hhmm_or_open")]
    pub clock_out: Option<NaiveTime>,
    /// Punctuality of the clock-in.
    pub status: AttendanceStatus,
}

impl AttendanceLog {
    /// Returns true while no clock-out has been recorded.
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Hours between clock-in and clock-out; unavailable while open.
    pub fn hours_worked(&self) -> HoursWorked {
        match self.clock_out {
            Some(clock_out) => hours_between(self.clock_in, clock_out),
            None => HoursWorked::Unavailable,
        }
    }
}

/// The single-user clock-in session flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockSession {
    /// Whether an attendance log is currently open.
    pub is_clocked_in: bool,
    /// `HH:MM` of the open clock-in, if any.
    pub last_clock_in_time: Option<String>,
}
