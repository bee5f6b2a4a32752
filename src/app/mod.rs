//! Application state and the commands the presentation layer calls.
//!
//! Every command takes the current time explicitly so results depend only
//! on the state and the arguments.

mod attendance;
mod dashboard;
mod employees;
mod leaves;
mod notifications;
mod payroll;
mod state;

pub use dashboard::{Dashboard, RECENT_EMPLOYEES};
pub use employees::{EmployeeUpdate, NewEmployee};
pub use leaves::{LeaveDecision, LeaveSubmission};
pub use payroll::{PayrollLine, PayrollSummary};
pub use state::HrState;
