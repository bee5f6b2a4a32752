//! HTTP API module for the HR record core.
//!
//! This module exposes the employee directory, leave workflow, attendance,
//! payroll, notifications and theme over a JSON REST API.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    EmployeeRequest, EmployeeUpdateRequest, LeaveRequestBody, PayrollRequest, SearchQuery,
};
pub use response::{ApiError, AttendanceRow, LeaveDecisionResponse, ThemeResponse};
pub use state::{AppState, Clock, Session};
