//! Attendance and leave deductions.
//!
//! Deduction amounts are never supplied by the caller; they are derived from
//! a clock time or a number of leave days and a rate. Inputs are validated in
//! the constructors so `calculate` itself cannot fail.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::config::AttendancePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeId, check_max};

/// Type label of the late deduction.
pub const LATE: &str = "Late";
/// Type label of the undertime deduction.
pub const UNDERTIME: &str = "Undertime";
/// Type label of the unpaid leave deduction.
pub const UNPAID_LEAVE: &str = "Unpaid Leave";

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// The rule a deduction is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeductionRule {
    /// Minutes late beyond the grace period × hourly rate / 60.
    Late {
        /// Arrival time.
        arrival: NaiveTime,
        /// Hourly rate basis.
        hourly_rate: Decimal,
        /// Office hours in force.
        policy: AttendancePolicy,
    },
    /// Minutes before the official end × hourly rate / 60.
    Undertime {
        /// Departure time.
        departure: NaiveTime,
        /// Hourly rate basis.
        hourly_rate: Decimal,
        /// Office hours in force.
        policy: AttendancePolicy,
    },
    /// Days of leave without pay × daily rate.
    UnpaidLeave {
        /// Unpaid days in the period.
        days: Decimal,
        /// Daily rate basis.
        daily_rate: Decimal,
    },
}

/// A negative payroll component derived from attendance or leave.
///
/// # Example
///
/// ```
/// use payroll_engine::components::Deduction;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let arrival = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
/// let late = Deduction::late(10001, arrival, Decimal::from(200)).unwrap();
/// assert_eq!(late.amount(), Decimal::from(50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduction {
    employee_id: EmployeeId,
    rule: DeductionRule,
    amount: Decimal,
}

impl Deduction {
    fn build(employee_id: i64, rule: DeductionRule) -> EngineResult<Self> {
        let employee_id = EmployeeId::new(employee_id)?;
        let mut deduction = Self {
            employee_id,
            rule,
            amount: Decimal::ZERO,
        };
        deduction.calculate();
        Ok(deduction)
    }

    fn check_rate(field: &str, rate: Decimal) -> EngineResult<()> {
        if rate < Decimal::ZERO {
            return Err(EngineError::invalid(field, "Rate cannot be negative"));
        }
        check_max(field, rate)
    }

    /// Late deduction against the default office hours (08:00, 15-minute grace).
    pub fn late(employee_id: i64, arrival: NaiveTime, hourly_rate: Decimal) -> EngineResult<Self> {
        Self::late_with_policy(employee_id, arrival, hourly_rate, AttendancePolicy::default())
    }

    /// Late deduction against `policy`.
    pub fn late_with_policy(
        employee_id: i64,
        arrival: NaiveTime,
        hourly_rate: Decimal,
        policy: AttendancePolicy,
    ) -> EngineResult<Self> {
        Self::check_rate("hourly_rate", hourly_rate)?;
        Self::build(
            employee_id,
            DeductionRule::Late {
                arrival,
                hourly_rate,
                policy,
            },
        )
    }

    /// Undertime deduction against the default office hours (17:00, no grace).
    pub fn undertime(
        employee_id: i64,
        departure: NaiveTime,
        hourly_rate: Decimal,
    ) -> EngineResult<Self> {
        let policy = AttendancePolicy::default();
        Self::undertime_with_policy(employee_id, departure, hourly_rate, policy)
    }

    /// Undertime deduction against `policy`.
    pub fn undertime_with_policy(
        employee_id: i64,
        departure: NaiveTime,
        hourly_rate: Decimal,
        policy: AttendancePolicy,
    ) -> EngineResult<Self> {
        Self::check_rate("hourly_rate", hourly_rate)?;
        Self::build(
            employee_id,
            DeductionRule::Undertime {
                departure,
                hourly_rate,
                policy,
            },
        )
    }

    /// Unpaid leave deduction: `days × daily_rate`.
    pub fn unpaid_leave(
        employee_id: i64,
        days: Decimal,
        daily_rate: Decimal,
    ) -> EngineResult<Self> {
        if days < Decimal::ZERO {
            return Err(EngineError::invalid("days", "Leave days cannot be negative"));
        }
        check_max("days", days)?;
        Self::check_rate("daily_rate", daily_rate)?;
        Self::build(employee_id, DeductionRule::UnpaidLeave { days, daily_rate })
    }

    /// Minutes late beyond the grace period; zero when within grace or early.
    pub fn minutes_late(arrival: NaiveTime, policy: &AttendancePolicy) -> i64 {
        let minutes = (arrival - policy.official_start).num_minutes();
        if minutes <= i64::from(policy.grace_minutes) {
            0
        } else {
            minutes - i64::from(policy.grace_minutes)
        }
    }

    /// Minutes left before the official end; zero at or after it.
    pub fn minutes_early(departure: NaiveTime, policy: &AttendancePolicy) -> i64 {
        (policy.official_end - departure).num_minutes().max(0)
    }

    /// Recomputes the amount from the rule's inputs. Idempotent.
    pub fn calculate(&mut self) {
        self.amount = match self.rule {
            DeductionRule::Late {
                arrival,
                hourly_rate,
                policy,
            } => {
                Decimal::from(Self::minutes_late(arrival, &policy)) * hourly_rate
                    / MINUTES_PER_HOUR
            }
            DeductionRule::Undertime {
                departure,
                hourly_rate,
                policy,
            } => {
                Decimal::from(Self::minutes_early(departure, &policy)) * hourly_rate
                    / MINUTES_PER_HOUR
            }
            DeductionRule::UnpaidLeave { days, daily_rate } => days * daily_rate,
        };
    }

    /// The employee the deduction is charged to.
    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// The rule the amount is derived from.
    pub fn rule(&self) -> &DeductionRule {
        &self.rule
    }

    /// The type label.
    pub fn component_type(&self) -> &str {
        match self.rule {
            DeductionRule::Late { .. } => LATE,
            DeductionRule::Undertime { .. } => UNDERTIME,
            DeductionRule::UnpaidLeave { .. } => UNPAID_LEAVE,
        }
    }

    /// The magnitude of the deduction, never negative.
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}
