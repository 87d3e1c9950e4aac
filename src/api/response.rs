//! Response types for the payroll API.
//!
//! A successful `/payroll/calculate` call returns a [`PayrollCalculationResponse`];
//! every failure returns an [`ApiError`] body whose `code` is one of the
//! [`ErrorCode`] variants in SCREAMING_SNAKE_CASE.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::PayrollSummary;

/// Successful calculation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollCalculationResponse {
    /// Fresh identifier stamped on every calculation.
    pub calculation_id: Uuid,
    /// When the fold ran.
    pub timestamp: DateTime<Utc>,
    /// Crate version that produced the figures.
    pub engine_version: String,
    /// The folded payroll.
    pub summary: PayrollSummary,
}

impl PayrollCalculationResponse {
    /// Stamps a summary with a fresh id, the current time and the crate version.
    pub fn new(summary: PayrollSummary) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").into(),
            summary,
        }
    }
}

/// Machine-readable failure codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Body was not valid JSON.
    MalformedJson,
    /// Body was JSON but did not match the request shape.
    ValidationError,
    /// Request lacked `Content-Type: application/json`.
    MissingContentType,
    /// A value was rejected by the engine.
    InvalidArgument,
    /// A component named a category outside the three known ones.
    UnknownCategory,
    /// A component belongs to a different employee than the payroll.
    EmployeeMismatch,
    /// Payroll configuration could not be loaded.
    ConfigError,
}

impl ErrorCode {
    /// HTTP status returned alongside this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Error body returned by every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// What went wrong, for programmatic handling.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Extra context, when there is any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Builds an error body without details.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attaches details to the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Body did not match the request shape.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Body was not valid JSON.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedJson, message)
    }
}

/// An [`ApiError`] paired with the status it is sent with.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl From<ApiError> for ApiErrorResponse {
    fn from(error: ApiError) -> Self {
        Self {
            status: error.code.status(),
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        let body = match err {
            EngineError::InvalidArgument { field, .. } => {
                ApiError::new(ErrorCode::InvalidArgument, message)
                    .with_details(format!("The value supplied for '{}' was rejected", field))
            }
            EngineError::UnknownCategory { category } => {
                ApiError::new(ErrorCode::UnknownCategory, message).with_details(format!(
                    "'{}' is not one of: Allowance, Deduction, Government Contribution",
                    category
                ))
            }
            EngineError::EmployeeMismatch { .. } => {
                ApiError::new(ErrorCode::EmployeeMismatch, message)
            }
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiError::new(ErrorCode::ConfigError, "Configuration error").with_details(message)
            }
        };
        body.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let body = ApiError::new(ErrorCode::UnknownCategory, "Unknown component category: Bonus");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "UNKNOWN_CATEGORY");
        assert_eq!(json["message"], "Unknown component category: Bonus");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_invalid_argument_maps_to_bad_request() {
        let response: ApiErrorResponse =
            EngineError::invalid("period_end", "Period end cannot be before start").into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, ErrorCode::InvalidArgument);
        assert!(response.error.message.contains("Period end cannot be before start"));
        assert!(response.error.details.unwrap().contains("period_end"));
    }

    #[test]
    fn test_unknown_category_maps_to_bad_request() {
        let response: ApiErrorResponse = EngineError::UnknownCategory {
            category: "Bonus".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, ErrorCode::UnknownCategory);
        assert!(response.error.details.unwrap().contains("Bonus"));
    }

    #[test]
    fn test_config_errors_map_to_server_error() {
        let response: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "missing.yaml".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_parse_failures_are_client_errors() {
        assert_eq!(ErrorCode::MalformedJson.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::MissingContentType.status(), StatusCode::BAD_REQUEST);
    }
}
