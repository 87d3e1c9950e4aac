//! Overtime record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::OvertimePolicy;
use crate::error::{EngineError, EngineResult};

use super::{EmployeeId, check_max};

/// Overtime worked on one day, paid at `hours × rate × multiplier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overtime {
    /// The employee who worked the overtime.
    pub employee_id: EmployeeId,
    /// The day the overtime was worked.
    pub date: NaiveDate,
    /// Hours of overtime, strictly positive and within the policy limit.
    pub hours: Decimal,
    /// Hourly rate the overtime is paid against.
    pub rate: Decimal,
    /// Premium multiplier (e.g., 1.25).
    pub multiplier: Decimal,
}

impl Overtime {
    /// Creates an overtime record validated against `policy`.
    ///
    /// A `None` multiplier falls back to the policy default.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::config::OvertimePolicy;
    /// use payroll_engine::models::Overtime;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let overtime = Overtime::new(
    ///     10001,
    ///     NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
    ///     Decimal::from(2),
    ///     Decimal::from(100),
    ///     None,
    ///     &OvertimePolicy::default(),
    /// ).unwrap();
    /// assert_eq!(overtime.pay().unwrap(), Decimal::from(250));
    /// ```
    pub fn new(
        employee_id: i64,
        date: NaiveDate,
        hours: Decimal,
        rate: Decimal,
        multiplier: Option<Decimal>,
        policy: &OvertimePolicy,
    ) -> EngineResult<Self> {
        let employee_id = EmployeeId::new(employee_id)?;

        if hours <= Decimal::ZERO || hours > policy.max_hours {
            return Err(EngineError::invalid(
                "hours",
                format!(
                    "Overtime hours must be greater than 0 and at most {}, got {}",
                    policy.max_hours.normalize(),
                    hours.normalize()
                ),
            ));
        }
        check_max("hours", hours)?;
        if rate < Decimal::ZERO {
            return Err(EngineError::invalid("rate", "Overtime rate cannot be negative"));
        }
        check_max("rate", rate)?;

        let multiplier = multiplier.unwrap_or(policy.default_multiplier);
        if multiplier <= Decimal::ZERO {
            return Err(EngineError::invalid("multiplier", "Overtime multiplier must be positive"));
        }
        check_max("multiplier", multiplier)?;

        Ok(Self {
            employee_id,
            date,
            hours,
            rate,
            multiplier,
        })
    }

    /// Overtime pay for this record.
    ///
    /// Fails when the product leaves `Decimal` range.
    pub fn pay(&self) -> EngineResult<Decimal> {
        self.hours
            .checked_mul(self.rate)
            .and_then(|pay| pay.checked_mul(self.multiplier))
            .ok_or_else(|| EngineError::invalid("rate", "Overtime pay is out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_AMOUNT;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn test_pay_multiplies_hours_rate_and_multiplier() {
        let overtime = Overtime::new(
            10001,
            day(),
            dec("1.5"),
            dec("125"),
            Some(dec("1.3")),
            &OvertimePolicy::default(),
        )
        .unwrap();
        assert_eq!(overtime.pay().unwrap(), dec("243.75"));
    }

    #[test]
    fn test_default_multiplier_from_policy() {
        let overtime =
            Overtime::new(10001, day(), dec("4"), dec("100"), None, &OvertimePolicy::default())
                .unwrap();
        assert_eq!(overtime.multiplier, dec("1.25"));
        assert_eq!(overtime.pay().unwrap(), dec("500"));
    }

    #[test]
    fn test_zero_hours_is_out_of_range() {
        let result =
            Overtime::new(10001, day(), dec("0"), dec("100"), None, &OvertimePolicy::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_hours_above_limit_is_out_of_range() {
        let err =
            Overtime::new(10001, day(), dec("24.5"), dec("100"), None, &OvertimePolicy::default())
                .unwrap_err();
        assert!(err.to_string().contains("hours"));
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let result =
            Overtime::new(10001, day(), dec("2"), dec("-1"), None, &OvertimePolicy::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_non_positive_employee_id_is_rejected() {
        let policy = OvertimePolicy::default();
        let result = Overtime::new(0, day(), dec("2"), dec("100"), None, &policy);
        assert!(result.is_err());
    }

    #[test]
    fn test_rate_above_limit_is_rejected() {
        let policy = OvertimePolicy::default();
        let err = Overtime::new(10001, day(), dec("24"), Decimal::MAX, None, &policy).unwrap_err();
        assert!(err.to_string().contains("Invalid rate"));
    }

    #[test]
    fn test_pay_out_of_range_is_an_error() {
        let policy = OvertimePolicy {
            max_hours: MAX_AMOUNT,
            ..OvertimePolicy::default()
        };
        let overtime =
            Overtime::new(10001, day(), MAX_AMOUNT, MAX_AMOUNT, Some(MAX_AMOUNT), &policy).unwrap();
        let err = overtime.pay().unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
