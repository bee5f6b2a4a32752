//! Core data models for the HR record core.
//!
//! Every relation between records is by identifier. No record holds a
//! reference into another collection.

mod attendance;
mod clock_time;
mod employee;
mod leave;
mod notification;
mod payroll;
mod theme;

pub use attendance::{AttendanceId, AttendanceLog, AttendanceStatus, ClockSession, OPEN_CLOCK_OUT};
pub use clock_time::{format_hhmm, parse_hhmm};
pub use employee::{Employee, EmployeeId, EmployeeStatus};
pub use leave::{DateRange, LeaveId, LeaveRequest, LeaveStatus, LeaveType};
pub use notification::{Notification, NotificationId, NotificationKind};
pub use payroll::PayrollRecord;
pub use theme::Theme;

pub(crate) use clock_time::{hhmm, hhmm_or_open};
pub(crate) use leave::StoredLeave;
