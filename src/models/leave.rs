//! Leave request model and related types.
//!
//! This module contains [`LeaveRequest`], its status and type enums, and
//! [`DateRange`], the inclusive date interval used for overlap checks.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};

use super::{Employee, EmployeeId};

/// Unique identifier of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaveId(pub u64);

impl fmt::Display for LeaveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review status of a leave request.
///
/// Requests are created `Pending` and move exactly once to `Approved` or
/// `Rejected`. Both of those are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Accepted; counts towards the employee's derived status.
    Approved,
    /// Declined; never blocks another request.
    Rejected,
}

impl LeaveStatus {
    /// Returns true once the request has been decided.
    pub fn is_terminal(self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        })
    }
}

/// The kind of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveType {
    /// Paid annual leave.
    #[serde(rename = "Annual Leave")]
    Annual,
    /// Sick leave.
    #[serde(rename = "Sick Leave")]
    Sick,
    /// Personal leave.
    #[serde(rename = "Personal Leave")]
    Personal,
}

/// An inclusive range of calendar dates with `start <= end`.
///
/// # Examples
///
/// ```
/// use hr_core::models::DateRange;
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
/// let range = DateRange::new(d(10), d(15)).unwrap();
///
/// assert!(range.contains(d(15)));
/// assert_eq!(range.days(), 6);
/// assert!(DateRange::new(d(15), d(10)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting an end date before the start date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> HrResult<Self> {
        if start > end {
            return Err(HrError::InvalidLeave {
                message: format!("end date {end} is before start date {start}"),
            });
        }
        Ok(Self { start, end })
    }

    /// A single-day range.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `day` falls within the range, inclusive of both ends.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Inclusive overlap test: `start <= other_end && end >= other_start`.
    pub fn overlaps(&self, other_start: NaiveDate, other_end: NaiveDate) -> bool {
        self.start <= other_end && self.end >= other_start
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// A request for time off.
///
/// The request is owned by an employee through `employee_id`.
/// `employee_name` is a display snapshot taken when the request was made
/// and plays no part in matching.
///
/// Deserializing requires an employee id and rejects an end date before
/// the start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredLeave")]
pub struct LeaveRequest {
    /// Unique identifier.
    pub id: LeaveId,
    /// The employee the leave is for.
    pub employee_id: EmployeeId,
    /// Employee name at the time of the request.
    #[serde(rename = "name")]
    pub employee_name: String,
    /// Kind of leave.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start: NaiveDate,
    /// Last day of leave, inclusive.
    pub end: NaiveDate,
    /// Half-day request; only meaningful when `start == end`.
    #[serde(default)]
    pub half_day: bool,
    /// Free-text justification.
    #[serde(default)]
    pub reason: String,
    /// Review status.
    #[serde(default)]
    pub status: LeaveStatus,
}

impl LeaveRequest {
    /// Returns true if the request covers `day`, inclusive of both ends.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Returns true if the request is approved and covers `day`.
    pub fn is_approved_on(&self, day: NaiveDate) -> bool {
        self.status == LeaveStatus::Approved && self.covers(day)
    }
}

/// A leave request as persisted, before its owner is resolved.
///
/// Older records name their employee only through `name`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredLeave {
    id: LeaveId,
    #[serde(default, alias = "empId")]
    employee_id: Option<EmployeeId>,
    #[serde(rename = "name", default)]
    employee_name: String,
    #[serde(rename = "type")]
    leave_type: LeaveType,
    start: NaiveDate,
    end: NaiveDate,
    #[serde(default)]
    half_day: bool,
    #[serde(default)]
    reason: String,
    #[serde(default)]
    status: LeaveStatus,
}

impl StoredLeave {
    /// Resolves the owner by id, or by exact name in `employees` when the
    /// record has no id.
    pub(crate) fn resolve(self, employees: &[Employee]) -> HrResult<LeaveRequest> {
        let employee_id = match self.employee_id {
            Some(id) => id,
            None => employees
                .iter()
                .find(|e| e.name == self.employee_name)
                .map(|e| e.id)
                .ok_or_else(|| HrError::InvalidLeave {
                    message: format!(
                        "leave request {} names unknown employee '{}'",
                        self.id, self.employee_name
                    ),
                })?,
        };
        self.into_request(employee_id)
    }

    fn into_request(self, employee_id: EmployeeId) -> HrResult<LeaveRequest> {
        let range = DateRange::new(self.start, self.end)?;
        Ok(LeaveRequest {
            id: self.id,
            employee_id,
            employee_name: self.employee_name,
            leave_type: self.leave_type,
            start: range.start(),
            end: range.end(),
            half_day: self.half_day,
            reason: self.reason,
            status: self.status,
        })
    }
}

impl TryFrom<StoredLeave> for LeaveRequest {
    type Error = HrError;

    fn try_from(stored: StoredLeave) -> HrResult<Self> {
        let employee_id = stored.employee_id.ok_or_else(|| HrError::InvalidLeave {
            message: format!("leave request {} has no employee id", stored.id),
        })?;
        stored.into_request(employee_id)
    }
}
