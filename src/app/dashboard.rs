//! Dashboard summary.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Employee, EmployeeStatus, LeaveStatus};

use super::state::HrState;

/// How many employees the dashboard lists as recent.
pub const RECENT_EMPLOYEES: usize = 3;

/// Headline figures for the dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Number of employees in the directory.
    pub total_employees: usize,
    /// Employees whose status is `On Leave`.
    pub on_leave_today: usize,
    /// Approved leave requests.
    pub approved_leaves: usize,
    /// Leave requests awaiting review.
    pub pending_leaves: usize,
    /// Attendance percentage for the current month.
    pub attendance_rate: u32,
    /// Unread notifications.
    pub unread_notifications: usize,
    /// Whether a clock-in session is open.
    pub is_clocked_in: bool,
    /// `HH:MM` of the open clock-in.
    pub last_clock_in_time: Option<String>,
    /// The most recently added employees, newest first.
    pub recent_employees: Vec<Employee>,
}

impl HrState {
    /// Builds the dashboard figures for `today`.
    pub fn dashboard(&self, today: NaiveDate) -> Dashboard {
        let count_leaves =
            |status: LeaveStatus| self.leaves.iter().filter(|l| l.status == status).count();

        Dashboard {
            total_employees: self.employees.len(),
            on_leave_today: self
                .employees
                .iter()
                .filter(|e| e.status == EmployeeStatus::OnLeave)
                .count(),
            approved_leaves: count_leaves(LeaveStatus::Approved),
            pending_leaves: count_leaves(LeaveStatus::Pending),
            attendance_rate: self.attendance_rate(today),
            unread_notifications: self.unread_notifications(),
            is_clocked_in: self.is_clocked_in(),
            last_clock_in_time: self.session.last_clock_in_time.clone(),
            recent_employees: self
                .recent_employees(RECENT_EMPLOYEES)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}
