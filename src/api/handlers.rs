//! HTTP request handlers for the HR API.
//!
//! Every handler tags its work with a fresh correlation id, runs one
//! query or command against [`AppState`], and maps [`HrError`] to an
//! [`ApiError`] body.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::app::{HrState, LeaveDecision, PayrollLine};
use crate::error::{HrError, HrResult};
use crate::models::{
    AttendanceId, AttendanceLog, Employee, EmployeeId, LeaveId, LeaveRequest, Notification,
    NotificationId,
};

use super::request::{
    EmployeeRequest, EmployeeUpdateRequest, LeaveRequestBody, PayrollRequest, SearchQuery,
};
use super::response::{
    ApiError, ApiErrorResponse, AttendanceRow, LeaveDecisionResponse, ThemeResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/:id", put(update_employee).delete(delete_employee))
        .route("/leaves", get(list_leaves).post(submit_leave))
        .route("/leaves/:id/approve", post(approve_leave))
        .route("/leaves/:id/reject", post(reject_leave))
        .route("/attendance", get(list_attendance))
        .route("/attendance/clock-in", post(clock_in))
        .route("/attendance/clock-out", post(clock_out))
        .route("/payroll", get(payroll_summary))
        .route("/payroll/:employee_id", get(get_payroll).put(set_payroll))
        .route("/notifications", get(list_notifications))
        .route("/notifications/:id/read", post(mark_notification_read))
        .route("/notifications/read-all", post(mark_all_notifications_read))
        .route("/theme", get(get_theme))
        .route("/theme/toggle", post(toggle_theme))
        .with_state(state)
}

fn begin(action: &'static str) -> Uuid {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, action, "Processing request");
    correlation_id
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, action: &'static str, err: HrError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        action,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn respond<T: Serialize>(
    correlation_id: Uuid,
    action: &'static str,
    status: StatusCode,
    result: HrResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(correlation_id = %correlation_id, action, "Request completed");
            json_response(status, body)
        }
        Err(err) => error_response(correlation_id, action, err),
    }
}

/// Unwraps a JSON body, or builds the 400 response for a rejected one.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response())
}

fn find_leave(leaves: &[LeaveRequest], id: LeaveId) -> HrResult<LeaveRequest> {
    leaves
        .iter()
        .find(|l| l.id == id)
        .cloned()
        .ok_or(HrError::LeaveNotFound { id })
}

fn attendance_row(logs: &[AttendanceLog], id: AttendanceId) -> Option<AttendanceRow> {
    logs.iter()
        .find(|log| log.id == id)
        .cloned()
        .map(AttendanceRow::from)
}

/// Handler for `GET /dashboard`.
async fn dashboard_handler(State(state): State<AppState>) -> Response {
    let correlation_id = begin("dashboard");
    let dashboard = state.read(|hr, now| hr.dashboard(now.date()));
    respond(correlation_id, "dashboard", StatusCode::OK, Ok(dashboard))
}

/// Handler for `GET /employees`, optionally filtered by `?q=`.
async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let correlation_id = begin("list_employees");
    let term = query.q.unwrap_or_default();
    let employees: Vec<Employee> =
        state.read(|hr, _| hr.search_employees(&term).into_iter().cloned().collect());
    respond(correlation_id, "list_employees", StatusCode::OK, Ok(employees))
}

/// Handler for `POST /employees`.
async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = begin("create_employee");
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = state.mutate(|hr, now| {
        let id = hr.add_employee(request.into(), now)?;
        hr.employee(id).cloned()
    });
    respond(correlation_id, "create_employee", StatusCode::CREATED, result)
}

/// Handler for `PUT /employees/{id}`.
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<EmployeeUpdateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = begin("update_employee");
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result =
        state.mutate(|hr, now| hr.update_employee(EmployeeId(id), request.into(), now).cloned());
    respond(correlation_id, "update_employee", StatusCode::OK, result)
}

/// Handler for `DELETE /employees/{id}`. Returns the removed employee.
async fn delete_employee(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = begin("delete_employee");
    let result = state.mutate(|hr, _| hr.delete_employee(EmployeeId(id)));
    respond(correlation_id, "delete_employee", StatusCode::OK, result)
}

/// Handler for `GET /leaves`, newest first.
async fn list_leaves(State(state): State<AppState>) -> Response {
    let correlation_id = begin("list_leaves");
    let leaves: Vec<LeaveRequest> =
        state.read(|hr, _| hr.leaves_newest_first().into_iter().cloned().collect());
    respond(correlation_id, "list_leaves", StatusCode::OK, Ok(leaves))
}

/// Handler for `POST /leaves`.
///
/// Returns 201 with the stored request, or 409 `LEAVE_CONFLICT` when it
/// overlaps another non-rejected request of the same employee.
async fn submit_leave(
    State(state): State<AppState>,
    payload: Result<Json<LeaveRequestBody>, JsonRejection>,
) -> Response {
    let correlation_id = begin("submit_leave");
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = state.mutate(|hr, now| {
        let id = hr.submit_leave(request.into(), now)?;
        find_leave(hr.leaves(), id)
    });
    respond(correlation_id, "submit_leave", StatusCode::CREATED, result)
}

fn decide(state: &AppState, id: u64, decision: LeaveDecision) -> HrResult<LeaveDecisionResponse> {
    let id = LeaveId(id);
    state.mutate(|hr, now| {
        let report = hr.decide_leave(id, decision, now)?;
        Ok(LeaveDecisionResponse {
            leave: find_leave(hr.leaves(), id)?,
            status_changes: report.changes,
        })
    })
}

/// Handler for `POST /leaves/{id}/approve`.
async fn approve_leave(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = begin("approve_leave");
    let result = decide(&state, id, LeaveDecision::Approve);
    respond(correlation_id, "approve_leave", StatusCode::OK, result)
}

/// Handler for `POST /leaves/{id}/reject`.
async fn reject_leave(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = begin("reject_leave");
    let result = decide(&state, id, LeaveDecision::Reject);
    respond(correlation_id, "reject_leave", StatusCode::OK, result)
}

/// Handler for `GET /attendance`, newest first with hours worked.
async fn list_attendance(State(state): State<AppState>) -> Response {
    let correlation_id = begin("list_attendance");
    let rows: Vec<AttendanceRow> = state.read(|hr, _| {
        hr.attendance_newest_first()
            .into_iter()
            .cloned()
            .map(AttendanceRow::from)
            .collect()
    });
    respond(correlation_id, "list_attendance", StatusCode::OK, Ok(rows))
}

/// Handler for `POST /attendance/clock-in`.
async fn clock_in(State(state): State<AppState>) -> Response {
    let correlation_id = begin("clock_in");
    let policy = state.policy();
    let result = state.mutate(|hr, now| {
        let id = hr.clock_in(now, policy)?;
        Ok(attendance_row(hr.attendance(), id))
    });
    respond(correlation_id, "clock_in", StatusCode::CREATED, result)
}

/// Handler for `POST /attendance/clock-out`.
///
/// The body is the closed log, or `null` when only a stale session flag
/// was cleared.
async fn clock_out(State(state): State<AppState>) -> Response {
    let correlation_id = begin("clock_out");
    let result = state.mutate(|hr, now| {
        let closed = hr.clock_out(now)?;
        Ok(closed.and_then(|id| attendance_row(hr.attendance(), id)))
    });
    respond(correlation_id, "clock_out", StatusCode::OK, result)
}

/// Handler for `GET /payroll`.
async fn payroll_summary(State(state): State<AppState>) -> Response {
    let correlation_id = begin("payroll_summary");
    let summary = state.read(|hr, _| hr.payroll_summary());
    respond(correlation_id, "payroll_summary", StatusCode::OK, Ok(summary))
}

fn payroll_line(hr: &HrState, employee_id: EmployeeId) -> HrResult<PayrollLine> {
    let name = hr.employee(employee_id)?.name.clone();
    let record = hr.payroll_for(employee_id);
    Ok(PayrollLine {
        employee_id,
        name,
        net_pay: record.net_pay(),
        record,
    })
}

/// Handler for `GET /payroll/{employee_id}`.
async fn get_payroll(State(state): State<AppState>, Path(employee_id): Path<u64>) -> Response {
    let correlation_id = begin("get_payroll");
    let result = state.read(|hr, _| payroll_line(hr, EmployeeId(employee_id)));
    respond(correlation_id, "get_payroll", StatusCode::OK, result)
}

/// Handler for `PUT /payroll/{employee_id}`.
async fn set_payroll(
    State(state): State<AppState>,
    Path(employee_id): Path<u64>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = begin("set_payroll");
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let employee_id = EmployeeId(employee_id);
    let result = state.mutate(|hr, _| {
        hr.set_payroll(request.into_record(employee_id))?;
        payroll_line(hr, employee_id)
    });
    respond(correlation_id, "set_payroll", StatusCode::OK, result)
}

/// Handler for `GET /notifications`, newest first.
async fn list_notifications(State(state): State<AppState>) -> Response {
    let correlation_id = begin("list_notifications");
    let notifications: Vec<Notification> = state.read(|hr, _| hr.notifications().to_vec());
    respond(correlation_id, "list_notifications", StatusCode::OK, Ok(notifications))
}

/// Handler for `POST /notifications/{id}/read`.
async fn mark_notification_read(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let correlation_id = begin("mark_notification_read");
    let result = state.mutate(|hr, _| {
        let found = hr.mark_notification_read(NotificationId(id));
        Ok((found, hr.unread_notifications()))
    });

    match result {
        Ok((true, unread)) => {
            info!(correlation_id = %correlation_id, notification_id = id, "Notification read");
            json_response(StatusCode::OK, json!({ "unread": unread }))
        }
        Ok((false, _)) => {
            warn!(correlation_id = %correlation_id, notification_id = id, "Notification not found");
            json_response(
                StatusCode::NOT_FOUND,
                ApiError::new(
                    "NOTIFICATION_NOT_FOUND",
                    format!("Notification not found: {id}"),
                ),
            )
        }
        Err(err) => error_response(correlation_id, "mark_notification_read", err),
    }
}

/// Handler for `POST /notifications/read-all`.
async fn mark_all_notifications_read(State(state): State<AppState>) -> Response {
    let correlation_id = begin("mark_all_notifications_read");
    let result = state
        .mutate(|hr, _| Ok(hr.mark_all_notifications_read()))
        .map(|marked| json!({ "marked": marked, "unread": 0 }));
    respond(correlation_id, "mark_all_notifications_read", StatusCode::OK, result)
}

/// Handler for `GET /theme`.
async fn get_theme(State(state): State<AppState>) -> Response {
    let correlation_id = begin("get_theme");
    let theme = state.read(|hr, _| ThemeResponse { theme: hr.theme() });
    respond(correlation_id, "get_theme", StatusCode::OK, Ok(theme))
}

/// Handler for `POST /theme/toggle`.
async fn toggle_theme(State(state): State<AppState>) -> Response {
    let correlation_id = begin("toggle_theme");
    let result = state.mutate(|hr, _| {
        Ok(ThemeResponse {
            theme: hr.toggle_theme(),
        })
    });
    respond(correlation_id, "toggle_theme", StatusCode::OK, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::Clock;
    use crate::config::{AttendancePolicy, ConfigLoader};
    use crate::store::RecordStore;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/hr_pro").expect("Failed to load config");
        let store = RecordStore::in_memory(config.seed().clone());
        let state = HrState::from_seed(config.seed());
        let clock = Clock::Fixed(
            NaiveDate::from_ymd_opt(2024, 2, 12)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        );
        AppState::new(state, store, AttendancePolicy::default(), clock)
    }

    async fn send(
        router: Router,
        method: &str,
        uri: &str,
        body: &str,
    ) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, "POST", "/leaves", "{invalid json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, "POST", "/employees", r#"{"name": "Dana"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("missing field"));
    }

    #[tokio::test]
    async fn test_unknown_notification_returns_404() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, "POST", "/notifications/99/read", "").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOTIFICATION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_decide_unknown_leave_returns_404() {
        let router = create_router(create_test_state());
        let (status, body) = send(router, "POST", "/leaves/42/approve", "").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "LEAVE_NOT_FOUND");
    }
}
