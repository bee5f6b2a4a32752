//! Employee model and related types.
//!
//! This module defines the [`Employee`] record and its [`EmployeeStatus`],
//! the one field that is partly derived and partly user-authoritative.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unique, immutable identifier of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Employment status of an employee.
///
/// `Active` and `OnLeave` are derived from approved leave by the status
/// synchronizer. `Terminated` and `Resigned` are set by direct edit and
/// are never overwritten by synchronization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    /// Working normally. Also the value assumed when none is stored.
    #[default]
    Active,
    /// Covered today by an approved leave request.
    #[serde(rename = "On Leave")]
    OnLeave,
    /// Employment ended by the employer.
    Terminated,
    /// Employment ended by the employee.
    Resigned,
}

impl EmployeeStatus {
    /// Returns true if this status is recomputed by the synchronizer.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_core::models::EmployeeStatus;
    ///
    /// assert!(EmployeeStatus::Active.is_derived());
    /// assert!(EmployeeStatus::OnLeave.is_derived());
    /// assert!(!EmployeeStatus::Resigned.is_derived());
    /// ```
    pub fn is_derived(self) -> bool {
        matches!(self, EmployeeStatus::Active | EmployeeStatus::OnLeave)
    }

    /// The display label, identical to the persisted form.
    pub fn as_str(self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::OnLeave => "On Leave",
            EmployeeStatus::Terminated => "Terminated",
            EmployeeStatus::Resigned => "Resigned",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An employee in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier, assigned at creation.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Job title.
    pub role: String,
    /// Department the employee belongs to.
    #[serde(alias = "dept")]
    pub department: String,
    /// Contact email address.
    pub email: String,
    /// The date the employee was added.
    pub join_date: NaiveDate,
    /// Current status; missing in older data, where it means `Active`.
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl Employee {
    /// Returns true if the employee's name or role contains `term`,
    /// ignoring case. An empty term matches everyone.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.role.to_lowercase().contains(&term)
    }
}
