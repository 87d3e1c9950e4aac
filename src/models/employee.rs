//! Employee model and related types.
//!
//! This module defines the [`EmployeeId`] newtype, the [`Position`] rate
//! schedule, and the [`Employee`] record that feeds rates and default
//! allowances into a payroll.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::check_max;

/// Standard working days in a semi-monthly period.
pub(crate) const STANDARD_WORKING_DAYS: Decimal = Decimal::from_parts(22, 0, 0, false, 0);

/// Standard working hours in a day.
pub(crate) const STANDARD_HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// A positive employee identifier.
///
/// # Example
///
/// ```
/// use payroll_engine::models::EmployeeId;
///
/// assert!(EmployeeId::new(10001).is_ok());
/// assert!(EmployeeId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct EmployeeId(i64);

impl EmployeeId {
    /// Creates an identifier, rejecting zero and negative values.
    pub fn new(id: i64) -> EngineResult<Self> {
        if id <= 0 {
            return Err(EngineError::invalid(
                "employee_id",
                format!("Employee ID must be positive, got {}", id),
            ));
        }
        Ok(Self(id))
    }

    /// Returns the raw identifier.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for EmployeeId {
    type Error = EngineError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<EmployeeId> for i64 {
    fn from(id: EmployeeId) -> Self {
        id.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Regular (permanent) employment.
    Regular,
    /// Probationary employment.
    Probationary,
}

/// A position's rate schedule and default allowances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// The position title (e.g., "Payroll Team Leader").
    pub title: String,
    /// The monthly basic salary for the position.
    pub monthly_rate: Decimal,
    /// Default rice subsidy per period.
    #[serde(default)]
    pub rice_subsidy: Decimal,
    /// Default phone allowance per period.
    #[serde(default)]
    pub phone_allowance: Decimal,
    /// Default clothing allowance per period.
    #[serde(default)]
    pub clothing_allowance: Decimal,
}

impl Position {
    /// Creates a position with no default allowances.
    pub fn new(title: impl Into<String>, monthly_rate: Decimal) -> EngineResult<Self> {
        let position = Self {
            title: title.into(),
            monthly_rate,
            rice_subsidy: Decimal::ZERO,
            phone_allowance: Decimal::ZERO,
            clothing_allowance: Decimal::ZERO,
        };
        position.validate()?;
        Ok(position)
    }

    /// Sets the default allowances, validating each amount.
    pub fn with_allowances(
        mut self,
        rice_subsidy: Decimal,
        phone_allowance: Decimal,
        clothing_allowance: Decimal,
    ) -> EngineResult<Self> {
        self.rice_subsidy = rice_subsidy;
        self.phone_allowance = phone_allowance;
        self.clothing_allowance = clothing_allowance;
        self.validate()?;
        Ok(self)
    }

    /// Checks the title is present and every amount is non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.title.trim().is_empty() {
            return Err(EngineError::invalid("title", "Position title cannot be empty"));
        }
        for (field, value) in [
            ("monthly_rate", self.monthly_rate),
            ("rice_subsidy", self.rice_subsidy),
            ("phone_allowance", self.phone_allowance),
            ("clothing_allowance", self.clothing_allowance),
        ] {
            if value < Decimal::ZERO {
                return Err(EngineError::invalid(field, "Amount cannot be negative"));
            }
            check_max(field, value)?;
        }
        Ok(())
    }

    /// Daily rate: monthly rate over the standard working days.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Position;
    /// use rust_decimal::Decimal;
    ///
    /// let position = Position::new("HR Rank and File", Decimal::from(22000)).unwrap();
    /// assert_eq!(position.daily_rate(), Decimal::from(1000));
    /// ```
    pub fn daily_rate(&self) -> Decimal {
        self.monthly_rate / STANDARD_WORKING_DAYS
    }

    /// Hourly rate: daily rate over an eight-hour day.
    pub fn hourly_rate(&self) -> Decimal {
        self.daily_rate() / STANDARD_HOURS_PER_DAY
    }
}

/// Represents an employee whose pay is being computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub employee_id: EmployeeId,
    /// Family name.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
    /// Date of birth, when known.
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    /// Employment status.
    pub status: EmploymentStatus,
    /// The position that supplies the rate basis.
    pub position: Position,
}

impl Employee {
    /// Creates an employee record, validating names and position.
    pub fn new(
        employee_id: i64,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        status: EmploymentStatus,
        position: Position,
    ) -> EngineResult<Self> {
        let employee_id = EmployeeId::new(employee_id)?;
        let last_name = last_name.into();
        let first_name = first_name.into();

        if last_name.trim().is_empty() {
            return Err(EngineError::invalid("last_name", "Last name cannot be empty"));
        }
        if first_name.trim().is_empty() {
            return Err(EngineError::invalid("first_name", "First name cannot be empty"));
        }
        position.validate()?;

        Ok(Self {
            employee_id,
            last_name,
            first_name,
            birthday: None,
            status,
            position,
        })
    }

    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Hourly rate basis for attendance deductions.
    pub fn hourly_rate(&self) -> Decimal {
        self.position.hourly_rate()
    }
}
