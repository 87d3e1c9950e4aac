//! Attendance record and clock-time parsing.
//!
//! An attendance row supplies the arrival and departure times that feed the
//! late and undertime deduction rules.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::components::Deduction;
use crate::config::AttendancePolicy;
use crate::error::{EngineError, EngineResult};

use super::EmployeeId;

/// Parses a wall-clock time given as `HH:MM` or `HH:MM:SS`.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::parse_clock_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(
///     parse_clock_time("log_in", "08:30").unwrap(),
///     NaiveTime::from_hms_opt(8, 30, 0).unwrap()
/// );
/// assert!(parse_clock_time("log_in", "8.30am").is_err());
/// ```
pub fn parse_clock_time(field: &str, value: &str) -> EngineResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| {
            EngineError::invalid(
                field,
                format!("'{}' is not a valid time (expected HH:MM or HH:MM:SS)", value),
            )
        })
}

/// One day's log-in and log-out for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// The employee the record belongs to.
    pub employee_id: EmployeeId,
    /// The day worked.
    pub date: NaiveDate,
    /// Arrival time.
    pub log_in: NaiveTime,
    /// Departure time.
    pub log_out: NaiveTime,
}

impl Attendance {
    /// Creates an attendance record; `log_out` must be after `log_in`.
    pub fn new(
        employee_id: i64,
        date: NaiveDate,
        log_in: NaiveTime,
        log_out: NaiveTime,
    ) -> EngineResult<Self> {
        let employee_id = EmployeeId::new(employee_id)?;
        if log_out <= log_in {
            return Err(EngineError::invalid("log_out", "Log out must be after log in"));
        }
        Ok(Self {
            employee_id,
            date,
            log_in,
            log_out,
        })
    }

    /// Hours between log-in and log-out.
    pub fn hours_worked(&self) -> Decimal {
        let minutes = (self.log_out - self.log_in).num_minutes();
        Decimal::from(minutes) / Decimal::from(60)
    }

    /// Whether the arrival falls after the grace window.
    pub fn is_late(&self, policy: &AttendancePolicy) -> bool {
        Deduction::minutes_late(self.log_in, policy) > 0
    }

    /// Builds the late deduction for this day's arrival.
    pub fn late_deduction(
        &self,
        hourly_rate: Decimal,
        policy: AttendancePolicy,
    ) -> EngineResult<Deduction> {
        Deduction::late_with_policy(self.employee_id.get(), self.log_in, hourly_rate, policy)
    }

    /// Builds the undertime deduction for this day's departure.
    pub fn undertime_deduction(
        &self,
        hourly_rate: Decimal,
        policy: AttendancePolicy,
    ) -> EngineResult<Deduction> {
        Deduction::undertime_with_policy(self.employee_id.get(), self.log_out, hourly_rate, policy)
    }
}
