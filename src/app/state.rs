//! The owned application state.
//!
//! [`HrState`] holds every collection the presentation layer renders. It is
//! passed explicitly to whatever needs it; there is no global instance.
//! Commands live in the sibling modules as further `impl HrState` blocks.

use chrono::NaiveDate;
use tracing::info;

use crate::calculation::{SyncReport, sync_statuses};
use crate::config::SeedData;
use crate::error::{HrError, HrResult};
use crate::models::{
    AttendanceLog, ClockSession, Employee, EmployeeId, LeaveRequest, Notification, PayrollRecord,
    Theme,
};
use crate::store::RecordStore;

/// All HR records plus the clock-in session and theme preference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HrState {
    pub(crate) employees: Vec<Employee>,
    pub(crate) leaves: Vec<LeaveRequest>,
    pub(crate) attendance: Vec<AttendanceLog>,
    pub(crate) payroll: Vec<PayrollRecord>,
    /// Newest first.
    pub(crate) notifications: Vec<Notification>,
    pub(crate) session: ClockSession,
    pub(crate) theme: Theme,
}

impl HrState {
    /// A fresh state holding only the seed records.
    pub fn from_seed(seed: &SeedData) -> Self {
        Self {
            employees: seed.employees.clone(),
            leaves: seed.leaves.clone(),
            payroll: seed.payroll.clone(),
            ..Self::default()
        }
    }

    /// Loads the state from `store` and runs the startup status sync.
    pub fn startup(store: &RecordStore, today: NaiveDate) -> Self {
        let mut state = store.load();
        let report = state.sync_statuses(today);
        info!(
            employees = state.employees.len(),
            leaves = state.leaves.len(),
            status_changes = report.changes.len(),
            "HR state ready"
        );
        state
    }

    /// Employees in directory order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Leave requests in submission order.
    pub fn leaves(&self) -> &[LeaveRequest] {
        &self.leaves
    }

    /// Attendance logs in clock-in order.
    pub fn attendance(&self) -> &[AttendanceLog] {
        &self.attendance
    }

    /// Stored payroll records.
    pub fn payroll(&self) -> &[PayrollRecord] {
        &self.payroll
    }

    /// Notifications, newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// The clock-in session flags.
    pub fn session(&self) -> &ClockSession {
        &self.session
    }

    /// The theme preference.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Looks up an employee by id.
    pub fn employee(&self, id: EmployeeId) -> HrResult<&Employee> {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .ok_or(HrError::EmployeeNotFound { id })
    }

    /// Recomputes derived employee statuses against `today`.
    pub fn sync_statuses(&mut self, today: NaiveDate) -> SyncReport {
        sync_statuses(&mut self.employees, &self.leaves, today)
    }

    /// Switches between the dark and light theme, returning the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

/// Next identifier after the largest in use, starting at 1.
pub(crate) fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeStatus;

    fn seed() -> SeedData {
        SeedData {
            employees: vec![Employee {
                id: EmployeeId(4),
                name: "Dana Lee".to_string(),
                role: "Recruiter".to_string(),
                department: "HR".to_string(),
                email: "dana@example.com".to_string(),
                join_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                status: EmployeeStatus::Active,
            }],
            ..SeedData::default()
        }
    }

    #[test]
    fn test_from_seed_starts_with_empty_activity() {
        let state = HrState::from_seed(&seed());
        assert_eq!(state.employees().len(), 1);
        assert!(state.attendance().is_empty());
        assert!(state.notifications().is_empty());
        assert!(!state.session().is_clocked_in);
        assert_eq!(state.theme(), Theme::Dark);
    }

    #[test]
    fn test_employee_lookup() {
        let state = HrState::from_seed(&seed());
        assert_eq!(state.employee(EmployeeId(4)).unwrap().name, "Dana Lee");
        assert!(matches!(
            state.employee(EmployeeId(5)),
            Err(HrError::EmployeeNotFound { id }) if id == EmployeeId(5)
        ));
    }

    #[test]
    fn test_toggle_theme() {
        let mut state = HrState::default();
        assert_eq!(state.toggle_theme(), Theme::Light);
        assert_eq!(state.toggle_theme(), Theme::Dark);
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(std::iter::empty()), 1);
        assert_eq!(next_id([3, 9, 2].into_iter()), 10);
    }
}
