//! Response types for the HR API.
//!
//! This module defines the error response structures, the mapping from
//! [`HrError`] to HTTP status codes, and the view types that add derived
//! figures to stored records.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::StatusChange;
use crate::error::HrError;
use crate::models::{AttendanceLog, LeaveRequest, Theme};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status code.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<HrError> for ApiErrorResponse {
    fn from(error: HrError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            HrError::ConfigNotFound { .. } | HrError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            HrError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            HrError::LeaveNotFound { .. } => {
                (StatusCode::NOT_FOUND, ApiError::new("LEAVE_NOT_FOUND", message))
            }
            HrError::LeaveConflict { conflicting_id, .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "LEAVE_CONFLICT",
                    message,
                    format!("Reject or change leave request {conflicting_id} first"),
                ),
            ),
            HrError::InvalidLeave { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::new("INVALID_LEAVE", message))
            }
            HrError::InvalidLeaveTransition { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "INVALID_TRANSITION",
                    message,
                    "Only pending leave requests can be approved or rejected",
                ),
            ),
            HrError::AlreadyClockedIn { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("ALREADY_CLOCKED_IN", message),
            ),
            HrError::NotClockedIn => {
                (StatusCode::CONFLICT, ApiError::new("NOT_CLOCKED_IN", message))
            }
            HrError::InvalidEmployee { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_EMPLOYEE", message),
            ),
            HrError::Storage { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORAGE_ERROR", "Failed to persist records", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// An attendance log with its hours worked.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRow {
    /// The stored log.
    #[serde(flatten)]
    pub log: AttendanceLog,
    /// Hours worked, `null` while open or when invalid.
    pub hours_worked: Option<Decimal>,
    /// Hours worked for display, e.g. `8.5 hrs` or `--`.
    pub hours_label: String,
}

impl From<AttendanceLog> for AttendanceRow {
    fn from(log: AttendanceLog) -> Self {
        let hours = log.hours_worked();
        Self {
            log,
            hours_worked: hours.hours(),
            hours_label: hours.to_string(),
        }
    }
}

/// Result of approving or rejecting a leave request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDecisionResponse {
    /// The request after the decision.
    pub leave: LeaveRequest,
    /// Employee statuses changed by the follow-up synchronization.
    pub status_changes: Vec<StatusChange>,
}

/// The current theme.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThemeResponse {
    /// The theme now in effect.
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceId, AttendanceStatus, EmployeeId, LeaveId};
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let error = HrError::LeaveConflict {
            employee_id: EmployeeId(1),
            conflicting_id: LeaveId(4),
            start: NaiveDate::from_ymd_opt(2024, 2, 14).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
        };
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "LEAVE_CONFLICT");
        assert!(response.error.details.unwrap().contains('4'));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response: ApiErrorResponse = HrError::EmployeeNotFound { id: EmployeeId(3) }.into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.message, "Employee not found: 3");
    }

    #[test]
    fn test_storage_maps_to_500() {
        let response: ApiErrorResponse = HrError::Storage {
            key: "hr_leaves".to_string(),
            message: "disk full".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "STORAGE_ERROR");
    }

    #[test]
    fn test_error_response_carries_status() {
        let response = ApiErrorResponse::new(
            StatusCode::BAD_REQUEST,
            ApiError::malformed_json("Invalid JSON syntax"),
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiErrorResponse::from(HrError::EmployeeNotFound { id: EmployeeId(9) })
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_attendance_row_flattens_log() {
        let row = AttendanceRow::from(AttendanceLog {
            id: AttendanceId(1),
            date: NaiveDate::from_ymd_opt(2024, 2, 12).unwrap(),
            clock_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            clock_out: Some(NaiveTime::from_hms_opt(17, 30, 0).unwrap()),
            status: AttendanceStatus::OnTime,
        });
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["clockOut"], "17:30");
        assert_eq!(json["hoursLabel"], "8.5 hrs");
        assert_eq!(json["hoursWorked"], "8.5");
    }
}
