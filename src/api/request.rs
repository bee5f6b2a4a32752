//! Request types for the HR API.
//!
//! Request bodies use camelCase field names, matching the stored records.
//! Each body converts into the command type of the `app` layer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::app::{EmployeeUpdate, LeaveSubmission, NewEmployee};
use crate::models::{EmployeeId, EmployeeStatus, LeaveType, PayrollRecord};

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    /// Display name.
    pub name: String,
    /// Job title.
    pub role: String,
    /// Department.
    #[serde(alias = "dept")]
    pub department: String,
    /// Contact email address.
    pub email: String,
}

impl From<EmployeeRequest> for NewEmployee {
    fn from(req: EmployeeRequest) -> Self {
        NewEmployee {
            name: req.name,
            role: req.role,
            department: req.department,
            email: req.email,
        }
    }
}

/// Request body for `PUT /employees/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdateRequest {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New job title.
    #[serde(default)]
    pub role: Option<String>,
    /// New department.
    #[serde(default, alias = "dept")]
    pub department: Option<String>,
    /// New contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// New status, e.g. `Terminated`.
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
}

impl From<EmployeeUpdateRequest> for EmployeeUpdate {
    fn from(req: EmployeeUpdateRequest) -> Self {
        EmployeeUpdate {
            name: req.name,
            role: req.role,
            department: req.department,
            email: req.email,
            status: req.status,
        }
    }
}

/// Request body for `POST /leaves`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestBody {
    /// The employee the leave is for.
    #[serde(alias = "empId")]
    pub employee_id: EmployeeId,
    /// Kind of leave, e.g. `Annual Leave`.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// First day.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
    /// Half-day request.
    #[serde(default)]
    pub half_day: bool,
    /// Free-text justification.
    #[serde(default)]
    pub reason: String,
}

impl From<LeaveRequestBody> for LeaveSubmission {
    fn from(req: LeaveRequestBody) -> Self {
        LeaveSubmission {
            employee_id: req.employee_id,
            leave_type: req.leave_type,
            start: req.start,
            end: req.end,
            half_day: req.half_day,
            reason: req.reason,
        }
    }
}

/// Request body for `PUT /payroll/{employee_id}`.
///
/// Amounts may be JSON numbers or decimal strings. Missing components
/// count as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRequest {
    /// Basic salary.
    #[serde(default)]
    pub basic: Decimal,
    /// Allowances.
    #[serde(default)]
    pub allowance: Decimal,
    /// Bonus.
    #[serde(default)]
    pub bonus: Decimal,
    /// Tax deduction.
    #[serde(default)]
    pub tax: Decimal,
    /// Insurance deduction.
    #[serde(default)]
    pub insurance: Decimal,
}

impl PayrollRequest {
    /// Builds the payroll record of `employee_id` from this body.
    pub fn into_record(self, employee_id: EmployeeId) -> PayrollRecord {
        PayrollRecord {
            employee_id,
            basic: self.basic,
            allowance: self.allowance,
            bonus: self.bonus,
            tax: self.tax,
            insurance: self.insurance,
        }
    }
}

/// Query string of `GET /employees`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive name or role filter.
    pub q: Option<String>,
}
