//! Leave request commands.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{DEFAULT_EXCLUDED_STATUSES, SyncReport, find_conflict};
use crate::error::{HrError, HrResult};
use crate::models::{
    DateRange, EmployeeId, LeaveId, LeaveRequest, LeaveStatus, LeaveType, NotificationKind,
};

use super::state::{HrState, next_id};

/// A leave request as submitted, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSubmission {
    /// The employee the leave is for.
    pub employee_id: EmployeeId,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
    /// Half-day request; requires a single-day range.
    pub half_day: bool,
    /// Free-text justification.
    pub reason: String,
}

/// The outcome of reviewing a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveDecision {
    /// Approve the request.
    Approve,
    /// Reject the request.
    Reject,
}

impl LeaveDecision {
    /// The status a request takes under this decision.
    pub fn target_status(self) -> LeaveStatus {
        match self {
            LeaveDecision::Approve => LeaveStatus::Approved,
            LeaveDecision::Reject => LeaveStatus::Rejected,
        }
    }
}

impl HrState {
    /// Stores a new pending leave request.
    ///
    /// The conflict check and the insert happen under the same `&mut self`
    /// borrow, so no other submission can slip in between them.
    ///
    /// # Errors
    ///
    /// - `EmployeeNotFound` if the employee does not exist
    /// - `InvalidLeave` if the end precedes the start, or a half-day
    ///   request spans more than one day
    /// - `LeaveConflict` if a non-rejected request of the same employee
    ///   overlaps; nothing is written
    pub fn submit_leave(
        &mut self,
        submission: LeaveSubmission,
        now: NaiveDateTime,
    ) -> HrResult<LeaveId> {
        let employee_name = self.employee(submission.employee_id)?.name.clone();
        let range = DateRange::new(submission.start, submission.end)?;
        if submission.half_day && range.days() != 1 {
            return Err(HrError::InvalidLeave {
                message: "a half-day request must start and end on the same day".to_string(),
            });
        }

        if let Some(existing) = find_conflict(
            &self.leaves,
            submission.employee_id,
            range,
            DEFAULT_EXCLUDED_STATUSES,
            None,
        ) {
            warn!(
                employee_id = %submission.employee_id,
                conflicting_id = %existing.id,
                start = %range.start(),
                end = %range.end(),
                "Leave request conflicts with an existing request"
            );
            return Err(HrError::LeaveConflict {
                employee_id: submission.employee_id,
                conflicting_id: existing.id,
                start: range.start(),
                end: range.end(),
            });
        }

        let id = LeaveId(next_id(self.leaves.iter().map(|l| l.id.0)));
        self.leaves.push(LeaveRequest {
            id,
            employee_id: submission.employee_id,
            employee_name: employee_name.clone(),
            leave_type: submission.leave_type,
            start: range.start(),
            end: range.end(),
            half_day: submission.half_day,
            reason: submission.reason.trim().to_string(),
            status: LeaveStatus::Pending,
        });

        info!(leave_id = %id, employee_id = %submission.employee_id, "Leave requested");
        self.notify(
            NotificationKind::Info,
            "Leave requested",
            format!(
                "{employee_name} requested leave from {} to {}",
                range.start(),
                range.end()
            ),
            now,
        );
        Ok(id)
    }

    /// Approves or rejects a pending request, then re-derives statuses.
    ///
    /// Decided requests are terminal: deciding one again is an
    /// `InvalidLeaveTransition`.
    pub fn decide_leave(
        &mut self,
        id: LeaveId,
        decision: LeaveDecision,
        now: NaiveDateTime,
    ) -> HrResult<SyncReport> {
        let to = decision.target_status();
        let leave = self
            .leaves
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(HrError::LeaveNotFound { id })?;

        if leave.status.is_terminal() {
            return Err(HrError::InvalidLeaveTransition {
                id,
                from: leave.status,
                to,
            });
        }
        leave.status = to;
        let message = format!(
            "Leave for {} from {} to {} was {}",
            leave.employee_name, leave.start, leave.end, to
        );

        let report = self.sync_statuses(now.date());

        info!(leave_id = %id, status = %to, status_changes = report.changes.len(), "Leave decided");
        let (kind, title) = match decision {
            LeaveDecision::Approve => (NotificationKind::Success, "Leave approved"),
            LeaveDecision::Reject => (NotificationKind::Warning, "Leave rejected"),
        };
        self.notify(kind, title, message, now);
        Ok(report)
    }

    /// Leave requests, newest first.
    pub fn leaves_newest_first(&self) -> Vec<&LeaveRequest> {
        self.leaves.iter().rev().collect()
    }

    /// Leave requests of one employee in submission order.
    pub fn leaves_for(&self, employee_id: EmployeeId) -> Vec<&LeaveRequest> {
        self.leaves
            .iter()
            .filter(|l| l.employee_id == employee_id)
            .collect()
    }
}
