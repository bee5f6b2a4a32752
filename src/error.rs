//! Error types for the HR record core.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition a command on the record store can reject.
//!
//! Malformed persisted data has no variant here. The store falls back to
//! defaults for it instead.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{EmployeeId, LeaveId, LeaveStatus};

/// The main error type for the HR record core.
///
/// # Example
///
/// ```
/// use hr_core::error::HrError;
///
/// let error = HrError::ConfigNotFound {
///     path: "/missing/app.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/app.yaml");
/// ```
#[derive(Debug, Error)]
pub enum HrError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No employee exists with the given id.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        id: EmployeeId,
    },

    /// No leave request exists with the given id.
    #[error("Leave request not found: {id}")]
    LeaveNotFound {
        /// The id that was looked up.
        id: LeaveId,
    },

    /// A new leave request overlaps an existing non-rejected one.
    #[error(
        "Leave for employee {employee_id} from {start} to {end} overlaps leave request {conflicting_id}"
    )]
    LeaveConflict {
        /// The employee the request was for.
        employee_id: EmployeeId,
        /// The existing request that blocks the new one.
        conflicting_id: LeaveId,
        /// Start of the rejected request.
        start: NaiveDate,
        /// End of the rejected request.
        end: NaiveDate,
    },

    /// A leave request carried inconsistent data.
    #[error("Invalid leave request: {message}")]
    InvalidLeave {
        /// What made the request invalid.
        message: String,
    },

    /// A leave request was asked to move out of a terminal status.
    #[error("Leave request {id} cannot move from {from} to {to}")]
    InvalidLeaveTransition {
        /// The leave request.
        id: LeaveId,
        /// Its current status.
        from: LeaveStatus,
        /// The requested status.
        to: LeaveStatus,
    },

    /// Clock-in was requested while a session is already open.
    #[error("Already clocked in since {since}")]
    AlreadyClockedIn {
        /// The clock-in time of the open session.
        since: String,
    },

    /// Clock-out was requested with no open session.
    #[error("Not clocked in")]
    NotClockedIn,

    /// An employee or payroll field was invalid.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The key-value backend failed to write or read a key.
    #[error("Storage error for key '{key}': {message}")]
    Storage {
        /// The physical key being accessed.
        key: String,
        /// The underlying failure.
        message: String,
    },
}

/// A type alias for Results that return HrError.
pub type HrResult<T> = Result<T, HrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = HrError::ConfigNotFound {
            path: "/missing/seed.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/seed.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = HrError::ConfigParseError {
            path: "/config/app.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/app.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_leave_conflict_displays_range_and_blocker() {
        let error = HrError::LeaveConflict {
            employee_id: EmployeeId(1),
            conflicting_id: LeaveId(7),
            start: NaiveDate::from_ymd_opt(2024, 2, 14).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Leave for employee 1 from 2024-02-14 to 2024-02-20 overlaps leave request 7"
        );
    }

    #[test]
    fn test_invalid_transition_displays_statuses() {
        let error = HrError::InvalidLeaveTransition {
            id: LeaveId(3),
            from: LeaveStatus::Rejected,
            to: LeaveStatus::Approved,
        };
        assert_eq!(
            error.to_string(),
            "Leave request 3 cannot move from rejected to approved"
        );
    }

    #[test]
    fn test_storage_error_displays_key() {
        let error = HrError::Storage {
            key: "hr_leaves".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Storage error for key 'hr_leaves': permission denied"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<HrError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_clocked_in() -> HrResult<()> {
            Err(HrError::NotClockedIn)
        }

        fn propagates_error() -> HrResult<()> {
            returns_not_clocked_in()?;
            Ok(())
        }

        assert!(matches!(propagates_error(), Err(HrError::NotClockedIn)));
    }
}
