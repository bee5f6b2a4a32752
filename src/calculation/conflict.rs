//! Leave conflict detection.
//!
//! A new leave request conflicts with an existing one when both belong to
//! the same employee, the existing one is not excluded by status, and the
//! two date ranges overlap inclusively.

use crate::models::{DateRange, EmployeeId, LeaveId, LeaveRequest, LeaveStatus};

/// Statuses ignored by a conflict check unless the caller says otherwise.
///
/// Rejected requests never block new ones.
pub const DEFAULT_EXCLUDED_STATUSES: &[LeaveStatus] = &[LeaveStatus::Rejected];

/// Finds the first existing request that blocks `range` for `employee_id`.
///
/// Requests whose status appears in `excluding` are skipped, as is the
/// request with id `ignore` (pass the request being edited so it does not
/// conflict with itself).
///
/// # Examples
///
/// ```
/// use hr_core::calculation::{DEFAULT_EXCLUDED_STATUSES, find_conflict};
/// use hr_core::models::{DateRange, EmployeeId, LeaveId, LeaveRequest, LeaveStatus, LeaveType};
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
/// let existing = vec![LeaveRequest {
///     id: LeaveId(1),
///     employee_id: EmployeeId(1),
///     employee_name: "Alice Johnson".to_string(),
///     leave_type: LeaveType::Annual,
///     start: d(10),
///     end: d(15),
///     half_day: false,
///     reason: "Family vacation".to_string(),
///     status: LeaveStatus::Approved,
/// }];
///
/// let wanted = DateRange::new(d(14), d(20)).unwrap();
/// let blocker = find_conflict(&existing, EmployeeId(1), wanted, DEFAULT_EXCLUDED_STATUSES, None);
/// assert_eq!(blocker.map(|l| l.id), Some(LeaveId(1)));
/// ```
pub fn find_conflict<'a>(
    leaves: &'a [LeaveRequest],
    employee_id: EmployeeId,
    range: DateRange,
    excluding: &[LeaveStatus],
    ignore: Option<LeaveId>,
) -> Option<&'a LeaveRequest> {
    leaves.iter().find(|other| {
        other.employee_id == employee_id
            && Some(other.id) != ignore
            && !excluding.contains(&other.status)
            && range.overlaps(other.start, other.end)
    })
}

/// Returns true if any existing request blocks `range` for `employee_id`.
///
/// This is the existence form of [`find_conflict`] with no ignored id.
pub fn has_conflict(
    leaves: &[LeaveRequest],
    employee_id: EmployeeId,
    range: DateRange,
    excluding: &[LeaveStatus],
) -> bool {
    find_conflict(leaves, employee_id, range, excluding, None).is_some()
}
