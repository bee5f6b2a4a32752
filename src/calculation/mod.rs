//! Pure rules over the HR records.
//!
//! This module contains the leave conflict checker, the derived status
//! synchronizer, and the aggregation functions behind the attendance and
//! payroll views. Nothing here touches storage.

mod attendance_rate;
mod conflict;
mod hours_worked;
mod net_pay;
mod status_sync;

pub use attendance_rate::{attendance_rate, rate_percent};
pub use conflict::{DEFAULT_EXCLUDED_STATUSES, find_conflict, has_conflict};
pub use hours_worked::{HoursWorked, hours_between, hours_worked};
pub use net_pay::net_pay;
pub use status_sync::{StatusChange, SyncReport, derived_status, sync_statuses};
