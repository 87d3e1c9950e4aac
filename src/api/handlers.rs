//! HTTP request handlers for the payroll API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{Attendance, LeaveRequest, Overtime, PayrollSummary, parse_clock_time};
use crate::payroll::Payroll;

use super::request::{ComponentDefaults, PayrollRequest};
use super::response::{ApiError, ApiErrorResponse, ErrorCode, PayrollCalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/calculate", post(calculate_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /payroll/calculate.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::validation_error(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    ErrorCode::MissingContentType,
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            let response: ApiErrorResponse = error.into();
            return json_response(response.status, response.error);
        }
    };

    let employee_id = request.employee_id;
    let start_time = Instant::now();
    match perform_calculation(request, state.config()) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                employee_id,
                lines = summary.lines.len(),
                gross_pay = %summary.totals.gross_pay,
                net_pay = %summary.totals.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll calculated"
            );
            json_response(StatusCode::OK, PayrollCalculationResponse::new(summary))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id,
                error = %err,
                "Payroll calculation failed"
            );
            let response: ApiErrorResponse = err.into();
            json_response(response.status, response.error)
        }
    }
}

/// Builds a payroll from the request and folds it.
fn perform_calculation(
    request: PayrollRequest,
    config: &ConfigLoader,
) -> EngineResult<PayrollSummary> {
    let employee_id = request.employee_id;
    let policy = config.attendance_policy();
    let overtime_policy = config.overtime_policy();

    let mut payroll = Payroll::new(
        employee_id,
        request.pay_period.start_date,
        request.pay_period.end_date,
        request.monthly_rate,
    )?
    .with_allowance_caps(config.allowance_caps());
    payroll.set_days_worked(request.days_worked)?;

    let allowances = request.allowances;
    payroll.set_rice_subsidy(allowances.rice_subsidy)?;
    payroll.set_phone_allowance(allowances.phone_allowance)?;
    payroll.set_clothing_allowance(allowances.clothing_allowance)?;

    let statutory = request.statutory;
    if statutory.apply_schedule {
        payroll.apply_statutory_schedule();
    } else {
        payroll.set_sss(statutory.sss)?;
        payroll.set_philhealth(statutory.philhealth)?;
        payroll.set_pagibig(statutory.pagibig)?;
        payroll.set_withholding_tax(statutory.withholding_tax)?;
    }

    let deductions = request.deductions;
    payroll.set_late_deduction(deductions.late)?;
    payroll.set_undertime_deduction(deductions.undertime)?;
    payroll.set_unpaid_leave(deductions.unpaid_leave)?;

    for entry in request.overtime {
        let rate = entry.rate.unwrap_or_else(|| payroll.hourly_rate());
        let overtime = Overtime::new(
            employee_id,
            entry.date,
            entry.hours,
            rate,
            entry.multiplier,
            &overtime_policy,
        )?;
        payroll.add_overtime(&overtime)?;
    }

    for entry in request.attendance {
        let log_in = parse_clock_time("log_in", &entry.log_in)?;
        let log_out = parse_clock_time("log_out", &entry.log_out)?;
        let attendance = Attendance::new(employee_id, entry.date, log_in, log_out)?;
        payroll.add_attendance(&attendance, policy)?;
    }

    for entry in request.leave {
        let mut leave = LeaveRequest::new(
            employee_id,
            entry.leave_type,
            entry.start_date,
            entry.end_date,
            "",
        )?;
        leave.status = entry.status;
        payroll.add_leave(&leave)?;
    }

    let defaults = ComponentDefaults {
        caps: config.allowance_caps(),
        policy,
        hourly_rate: payroll.hourly_rate(),
        daily_rate: payroll.daily_rate(),
        monthly_rate: payroll.monthly_rate(),
    };
    for entry in request.components {
        let component = entry.into_component(employee_id, &defaults)?;
        payroll.add_component(component)?;
    }

    payroll.recalculate_all()?;
    payroll.summary()
}
