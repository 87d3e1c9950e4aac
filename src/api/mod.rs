//! HTTP API module for the payroll engine.
//!
//! Exposes `POST /payroll/calculate`, which builds a payroll from a JSON
//! request, recalculates it, and returns the summary.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AllowanceFields, AttendanceRequest, ComponentDefaults, ComponentRequest, DeductionFields,
    LeaveRequestBody, OvertimeRequest, PayPeriodRequest, PayrollRequest, StatutoryFields,
};
pub use response::{ApiError, ApiErrorResponse, ErrorCode, PayrollCalculationResponse};
pub use state::AppState;
