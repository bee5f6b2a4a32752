//! Clock-in / clock-out commands.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::calculation::attendance_rate;
use crate::config::AttendancePolicy;
use crate::error::{HrError, HrResult};
use crate::models::{AttendanceId, AttendanceLog, ClockSession, OPEN_CLOCK_OUT, format_hhmm};

use super::state::{HrState, next_id};

impl HrState {
    /// The open attendance log, if any.
    pub fn open_log(&self) -> Option<&AttendanceLog> {
        self.attendance.iter().rev().find(|log| log.is_open())
    }

    /// True while a session is open, by flag or by an open log.
    pub fn is_clocked_in(&self) -> bool {
        self.session.is_clocked_in || self.open_log().is_some()
    }

    /// Opens a new attendance log at `now`, classified by `policy`.
    pub fn clock_in(
        &mut self,
        now: NaiveDateTime,
        policy: &AttendancePolicy,
    ) -> HrResult<AttendanceId> {
        if self.is_clocked_in() {
            let since = self
                .session
                .last_clock_in_time
                .clone()
                .or_else(|| self.open_log().map(|log| format_hhmm(log.clock_in)))
                .unwrap_or_else(|| OPEN_CLOCK_OUT.to_string());
            return Err(HrError::AlreadyClockedIn { since });
        }

        let clock_in = now.time();
        let log = AttendanceLog {
            id: AttendanceId(next_id(self.attendance.iter().map(|l| l.id.0))),
            date: now.date(),
            clock_in,
            clock_out: None,
            status: policy.classify(clock_in),
        };
        let id = log.id;

        self.session = ClockSession {
            is_clocked_in: true,
            last_clock_in_time: Some(format_hhmm(clock_in)),
        };
        info!(attendance_id = %id, date = %log.date, status = ?log.status, "Clocked in");
        self.attendance.push(log);
        Ok(id)
    }

    /// Closes the open attendance log at `now` and clears the session.
    ///
    /// Returns the closed log's id, or `None` when the session flag was
    /// set but no open log existed.
    pub fn clock_out(&mut self, now: NaiveDateTime) -> HrResult<Option<AttendanceId>> {
        if !self.is_clocked_in() {
            return Err(HrError::NotClockedIn);
        }

        let closed = self
            .attendance
            .iter_mut()
            .rev()
            .find(|log| log.is_open())
            .map(|log| {
                log.clock_out = Some(now.time());
                log.id
            });
        self.session = ClockSession::default();

        match closed {
            Some(id) => info!(attendance_id = %id, "Clocked out"),
            None => warn!("Session flag was set without an open attendance log"),
        }
        Ok(closed)
    }

    /// Attendance logs, newest first.
    pub fn attendance_newest_first(&self) -> Vec<&AttendanceLog> {
        self.attendance.iter().rev().collect()
    }

    /// Attendance percentage for the month containing `today`.
    pub fn attendance_rate(&self, today: NaiveDate) -> u32 {
        attendance_rate(&self.attendance, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::HoursWorked;
    use crate::models::AttendanceStatus;
    use rust_decimal::Decimal;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn policy() -> AttendancePolicy {
        AttendancePolicy {
            grace_minutes: 5,
            ..AttendancePolicy::default()
        }
    }

    #[test]
    fn test_clock_in_then_out() {
        let mut state = HrState::default();
        let id = state.clock_in(at(12, 9, 0), &policy()).unwrap();
        assert!(state.is_clocked_in());
        assert_eq!(state.session().last_clock_in_time.as_deref(), Some("09:00"));

        let closed = state.clock_out(at(12, 17, 30)).unwrap();

        assert_eq!(closed, Some(id));
        assert!(!state.is_clocked_in());
        assert_eq!(state.session(), &ClockSession::default());
        assert_eq!(
            state.attendance()[0].hours_worked(),
            HoursWorked::Hours(Decimal::new(85, 1))
        );
    }

    #[test]
    fn test_late_after_grace() {
        let mut state = HrState::default();
        state.clock_in(at(12, 9, 5), &policy()).unwrap();
        state.clock_out(at(12, 17, 0)).unwrap();
        state.clock_in(at(13, 9, 6), &policy()).unwrap();

        assert_eq!(state.attendance()[0].status, AttendanceStatus::OnTime);
        assert_eq!(state.attendance()[1].status, AttendanceStatus::Late);
    }

    #[test]
    fn test_double_clock_in_rejected() {
        let mut state = HrState::default();
        state.clock_in(at(12, 9, 0), &policy()).unwrap();
        match state.clock_in(at(12, 9, 30), &policy()) {
            Err(HrError::AlreadyClockedIn { since }) => assert_eq!(since, "09:00"),
            other => panic!("Expected AlreadyClockedIn, got {other:?}"),
        }
        assert_eq!(state.attendance().len(), 1);
    }

    #[test]
    fn test_clock_out_without_session_rejected() {
        let mut state = HrState::default();
        assert!(matches!(state.clock_out(at(12, 17, 0)), Err(HrError::NotClockedIn)));
    }

    #[test]
    fn test_dangling_session_flag_clears() {
        let mut state = HrState::default();
        state.session.is_clocked_in = true;

        assert_eq!(state.clock_out(at(12, 17, 0)).unwrap(), None);
        assert!(!state.is_clocked_in());
    }

    #[test]
    fn test_open_log_without_flag_still_counts() {
        let mut state = HrState::default();
        state.clock_in(at(12, 9, 0), &policy()).unwrap();
        state.session = ClockSession::default();

        assert!(state.is_clocked_in());
        assert!(state.clock_out(at(12, 12, 0)).unwrap().is_some());
    }

    #[test]
    fn test_rate_and_ordering() {
        let mut state = HrState::default();
        for day in [1, 2] {
            state.clock_in(at(day, 9, 0), &policy()).unwrap();
            state.clock_out(at(day, 17, 0)).unwrap();
        }

        let newest: Vec<u64> = state.attendance_newest_first().iter().map(|l| l.id.0).collect();
        assert_eq!(newest, vec![2, 1]);
        assert_eq!(state.attendance_rate(at(4, 0, 0).date()), 50);
    }
}
