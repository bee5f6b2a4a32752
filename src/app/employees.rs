//! Employee directory commands.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{HrError, HrResult};
use crate::models::{Employee, EmployeeId, EmployeeStatus, NotificationKind};

use super::state::{HrState, next_id};

/// Fields supplied when adding an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Display name.
    pub name: String,
    /// Job title.
    pub role: String,
    /// Department.
    pub department: String,
    /// Contact email address.
    pub email: String,
}

/// Fields that may change on an existing employee. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New job title.
    pub role: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New status. Only `Terminated` and `Resigned` survive the
    /// synchronization that follows every edit.
    pub status: Option<EmployeeStatus>,
}

fn require_text(field: &str, value: &str) -> HrResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(HrError::InvalidEmployee {
            field: field.to_string(),
            message: "must not be blank".to_string(),
        });
    }
    Ok(value.to_string())
}

fn require_email(value: &str) -> HrResult<String> {
    let value = require_text("email", value)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(value),
        _ => Err(HrError::InvalidEmployee {
            field: "email".to_string(),
            message: format!("'{value}' is not an email address"),
        }),
    }
}

impl HrState {
    /// Adds an employee who joins on `now`'s date with status `Active`.
    pub fn add_employee(&mut self, new: NewEmployee, now: NaiveDateTime) -> HrResult<EmployeeId> {
        let employee = Employee {
            id: EmployeeId(next_id(self.employees.iter().map(|e| e.id.0))),
            name: require_text("name", &new.name)?,
            role: require_text("role", &new.role)?,
            department: require_text("department", &new.department)?,
            email: require_email(&new.email)?,
            join_date: now.date(),
            status: EmployeeStatus::Active,
        };
        let id = employee.id;

        info!(employee_id = %id, name = %employee.name, "Employee added");
        self.notify(
            NotificationKind::Success,
            "Employee added",
            format!("{} joined as {}", employee.name, employee.role),
            now,
        );
        self.employees.push(employee);
        Ok(id)
    }

    /// Applies `update` to an employee, then re-derives statuses for `now`.
    ///
    /// A rename is copied to the display name on the employee's leave
    /// requests.
    pub fn update_employee(
        &mut self,
        id: EmployeeId,
        update: EmployeeUpdate,
        now: NaiveDateTime,
    ) -> HrResult<&Employee> {
        let name = update.name.as_deref().map(|v| require_text("name", v)).transpose()?;
        let role = update.role.as_deref().map(|v| require_text("role", v)).transpose()?;
        let department = update
            .department
            .as_deref()
            .map(|v| require_text("department", v))
            .transpose()?;
        let email = update.email.as_deref().map(require_email).transpose()?;

        let employee = self
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(HrError::EmployeeNotFound { id })?;

        if let Some(name) = name {
            employee.name = name;
        }
        if let Some(role) = role {
            employee.role = role;
        }
        if let Some(department) = department {
            employee.department = department;
        }
        if let Some(email) = email {
            employee.email = email;
        }
        if let Some(status) = update.status {
            employee.status = status;
        }
        let display_name = employee.name.clone();

        for leave in self.leaves.iter_mut().filter(|l| l.employee_id == id) {
            leave.employee_name.clone_from(&display_name);
        }
        self.sync_statuses(now.date());

        info!(employee_id = %id, "Employee updated");
        self.employee(id)
    }

    /// Removes an employee together with their payroll record and leave requests.
    pub fn delete_employee(&mut self, id: EmployeeId) -> HrResult<Employee> {
        let index = self
            .employees
            .iter()
            .position(|e| e.id == id)
            .ok_or(HrError::EmployeeNotFound { id })?;
        let removed = self.employees.remove(index);

        self.payroll.retain(|p| p.employee_id != id);
        self.leaves.retain(|l| l.employee_id != id);

        info!(employee_id = %id, name = %removed.name, "Employee deleted");
        Ok(removed)
    }

    /// Employees whose name or role contains `term`, ignoring case.
    pub fn search_employees(&self, term: &str) -> Vec<&Employee> {
        self.employees.iter().filter(|e| e.matches(term)).collect()
    }

    /// The `count` most recently added employees, newest first.
    pub fn recent_employees(&self, count: usize) -> Vec<&Employee> {
        self.employees.iter().rev().take(count).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeaveId, LeaveRequest, LeaveStatus, LeaveType, PayrollRecord};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 12)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn new_employee(name: &str, role: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            role: role.to_string(),
            department: "Engineering".to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        }
    }

    fn state_with_two() -> HrState {
        let mut state = HrState::default();
        state.add_employee(new_employee("Alice Johnson", "UX Designer"), now()).unwrap();
        state.add_employee(new_employee("Bob Smith", "Frontend Developer"), now()).unwrap();
        state
    }

    #[test]
    fn test_add_assigns_sequential_ids_and_join_date() {
        let state = state_with_two();
        let ids: Vec<EmployeeId> = state.employees().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EmployeeId(1), EmployeeId(2)]);
        assert_eq!(state.employees()[0].join_date, now().date());
        assert_eq!(state.employees()[0].status, EmployeeStatus::Active);
        assert_eq!(state.notifications().len(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut state = state_with_two();
        state.delete_employee(EmployeeId(1)).unwrap();
        let id = state.add_employee(new_employee("Charlie Davis", "PM"), now()).unwrap();
        assert_eq!(id, EmployeeId(3));
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut state = HrState::default();
        match state.add_employee(new_employee("  ", "Role"), now()) {
            Err(HrError::InvalidEmployee { field, .. }) => assert_eq!(field, "name"),
            other => panic!("Expected InvalidEmployee, got {other:?}"),
        }
        assert!(state.employees().is_empty());
    }

    #[test]
    fn test_add_rejects_bad_email() {
        let mut state = HrState::default();
        let mut new = new_employee("Alice", "Role");
        new.email = "alice.example.com".to_string();
        assert!(matches!(
            state.add_employee(new, now()),
            Err(HrError::InvalidEmployee { field, .. }) if field == "email"
        ));
    }

    #[test]
    fn test_update_terminated_sticks() {
        let mut state = state_with_two();
        let update = EmployeeUpdate {
            status: Some(EmployeeStatus::Terminated),
            ..EmployeeUpdate::default()
        };
        let employee = state.update_employee(EmployeeId(1), update, now()).unwrap();
        assert_eq!(employee.status, EmployeeStatus::Terminated);
    }

    #[test]
    fn test_update_to_on_leave_without_leave_is_re_derived() {
        let mut state = state_with_two();
        let update = EmployeeUpdate {
            status: Some(EmployeeStatus::OnLeave),
            ..EmployeeUpdate::default()
        };
        let employee = state.update_employee(EmployeeId(1), update, now()).unwrap();
        assert_eq!(employee.status, EmployeeStatus::Active);
    }

    #[test]
    fn test_rename_refreshes_leave_display_name() {
        let mut state = state_with_two();
        state.leaves.push(LeaveRequest {
            id: LeaveId(1),
            employee_id: EmployeeId(1),
            employee_name: "Alice Johnson".to_string(),
            leave_type: LeaveType::Annual,
            start: now().date(),
            end: now().date(),
            half_day: false,
            reason: String::new(),
            status: LeaveStatus::Pending,
        });
        let update = EmployeeUpdate {
            name: Some("Alice Carter".to_string()),
            ..EmployeeUpdate::default()
        };

        state.update_employee(EmployeeId(1), update, now()).unwrap();

        assert_eq!(state.leaves()[0].employee_name, "Alice Carter");
    }

    #[test]
    fn test_update_unknown_employee() {
        let mut state = state_with_two();
        assert!(matches!(
            state.update_employee(EmployeeId(9), EmployeeUpdate::default(), now()),
            Err(HrError::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_delete_cascades_to_payroll_and_leaves() {
        let mut state = state_with_two();
        state.payroll.push(PayrollRecord::zeroed(EmployeeId(1)));
        state.payroll.push(PayrollRecord::zeroed(EmployeeId(2)));

        let removed = state.delete_employee(EmployeeId(1)).unwrap();

        assert_eq!(removed.name, "Alice Johnson");
        assert_eq!(state.employees().len(), 1);
        assert_eq!(state.payroll().len(), 1);
        assert_eq!(state.payroll()[0].employee_id, EmployeeId(2));
    }

    #[test]
    fn test_search_and_recent() {
        let state = state_with_two();
        let found: Vec<&str> = state
            .search_employees("DEVELOPER")
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(found, vec!["Bob Smith"]);
        assert_eq!(state.search_employees("").len(), 2);

        let recent: Vec<EmployeeId> = state.recent_employees(5).iter().map(|e| e.id).collect();
        assert_eq!(recent, vec![EmployeeId(2), EmployeeId(1)]);
    }
}
