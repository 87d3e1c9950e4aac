//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building and computing a payroll.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Every validation failure is raised synchronously at the point of
/// construction or assignment, before any state is mutated.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidArgument {
///     field: "period_end".to_string(),
///     message: "Period end cannot be before start".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid period_end: Period end cannot be before start");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A supplied value failed validation.
    #[error("Invalid {field}: {message}")]
    InvalidArgument {
        /// The field or parameter that was rejected.
        field: String,
        /// A description of why the value was rejected.
        message: String,
    },

    /// A component category label was not one of the known categories.
    ///
    /// This is the invalid-argument condition for category labels; it carries
    /// the rejected label.
    #[error("Unknown component category: {category}")]
    UnknownCategory {
        /// The label that could not be classified.
        category: String,
    },

    /// A component belonging to another employee was offered to a payroll.
    #[error("Component for employee {actual} cannot be added to payroll of employee {expected}")]
    EmployeeMismatch {
        /// The employee that owns the payroll.
        expected: i64,
        /// The employee the component was built for.
        actual: i64,
    },

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
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidArgument`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
