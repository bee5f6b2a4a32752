//! Derived employee status synchronization.
//!
//! An employee whose status is derived (`Active` or `On Leave`) is
//! `On Leave` exactly when an approved leave request of theirs covers
//! today, and `Active` otherwise. `Terminated` and `Resigned` are left
//! untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Employee, EmployeeId, EmployeeStatus, LeaveRequest};

/// One status change made by [`sync_statuses`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    /// The employee whose status changed.
    pub employee_id: EmployeeId,
    /// Status before synchronization.
    pub from: EmployeeStatus,
    /// Status after synchronization.
    pub to: EmployeeStatus,
}

/// The outcome of a synchronization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Employees whose status changed, in directory order.
    pub changes: Vec<StatusChange>,
}

impl SyncReport {
    /// Returns true if nothing changed.
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Computes the derived status of `employee_id` on `today`.
///
/// # Examples
///
/// ```
/// use hr_core::calculation::derived_status;
/// use hr_core::models::{EmployeeId, EmployeeStatus};
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 2, 12).unwrap();
/// assert_eq!(derived_status(EmployeeId(1), &[], today), EmployeeStatus::Active);
/// ```
pub fn derived_status(
    employee_id: EmployeeId,
    leaves: &[LeaveRequest],
    today: NaiveDate,
) -> EmployeeStatus {
    let on_leave = leaves
        .iter()
        .any(|leave| leave.employee_id == employee_id && leave.is_approved_on(today));
    if on_leave {
        EmployeeStatus::OnLeave
    } else {
        EmployeeStatus::Active
    }
}

/// Recomputes every derived employee status against `today`.
///
/// Running this twice with no intervening change makes no further
/// changes. It must run at startup and after every leave approval.
pub fn sync_statuses(
    employees: &mut [Employee],
    leaves: &[LeaveRequest],
    today: NaiveDate,
) -> SyncReport {
    let mut report = SyncReport::default();

    for employee in employees.iter_mut().filter(|e| e.status.is_derived()) {
        let status = derived_status(employee.id, leaves, today);
        if status != employee.status {
            debug!(
                employee_id = %employee.id,
                from = %employee.status,
                to = %status,
                "Derived status changed"
            );
            report.changes.push(StatusChange {
                employee_id: employee.id,
                from: employee.status,
                to: status,
            });
            employee.status = status;
        }
    }

    report
}
