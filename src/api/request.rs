//! Request types for the payroll API.
//!
//! This module defines the JSON body of `/payroll/calculate` and the
//! conversions from raw request values into validated engine types. Clock
//! times and component categories arrive as strings and are parsed here.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::components::{
    Allowance, AllowanceKind, CLOTHING_ALLOWANCE, ComponentCategory, Deduction,
    GovernmentContribution, LATE, PAGIBIG, PHILHEALTH, PHONE_ALLOWANCE, PayrollComponent,
    RICE_SUBSIDY, SSS, UNDERTIME, UNPAID_LEAVE, WITHHOLDING_TAX,
};
use crate::config::{AllowanceCaps, AttendancePolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveStatus, LeaveType, parse_clock_time};

/// Request body for the `/payroll/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The employee being paid.
    pub employee_id: i64,
    /// The pay period.
    pub pay_period: PayPeriodRequest,
    /// Monthly basic salary.
    pub monthly_rate: Decimal,
    /// Days worked in the period.
    #[serde(default)]
    pub days_worked: Decimal,
    /// Directly-set allowance amounts.
    #[serde(default)]
    pub allowances: AllowanceFields,
    /// Directly-set statutory amounts.
    #[serde(default)]
    pub statutory: StatutoryFields,
    /// Directly-set attendance deduction totals.
    #[serde(default)]
    pub deductions: DeductionFields,
    /// Overtime worked during the period.
    #[serde(default)]
    pub overtime: Vec<OvertimeRequest>,
    /// Daily log-in/log-out rows.
    #[serde(default)]
    pub attendance: Vec<AttendanceRequest>,
    /// Leave requests touching the period.
    #[serde(default)]
    pub leave: Vec<LeaveRequestBody>,
    /// Explicit components.
    #[serde(default)]
    pub components: Vec<ComponentRequest>,
}

/// Pay period in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayPeriodRequest {
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
}

/// Directly-set allowance fields; over-cap values are clamped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllowanceFields {
    /// Rice subsidy.
    #[serde(default)]
    pub rice_subsidy: Decimal,
    /// Phone allowance.
    #[serde(default)]
    pub phone_allowance: Decimal,
    /// Clothing allowance.
    #[serde(default)]
    pub clothing_allowance: Decimal,
}

/// Directly-set statutory fields.
///
/// With `apply_schedule` set, the four amounts are computed from the monthly
/// rate and the explicit values are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatutoryFields {
    /// Compute all four amounts from the bracket tables.
    #[serde(default)]
    pub apply_schedule: bool,
    /// SSS employee contribution.
    #[serde(default)]
    pub sss: Decimal,
    /// PhilHealth employee share.
    #[serde(default)]
    pub philhealth: Decimal,
    /// Pag-IBIG employee contribution.
    #[serde(default)]
    pub pagibig: Decimal,
    /// Withholding tax.
    #[serde(default)]
    pub withholding_tax: Decimal,
}

/// Directly-set attendance and leave deduction totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeductionFields {
    /// Late deduction total.
    #[serde(default)]
    pub late: Decimal,
    /// Undertime deduction total.
    #[serde(default)]
    pub undertime: Decimal,
    /// Unpaid leave total.
    #[serde(default)]
    pub unpaid_leave: Decimal,
}

/// One overtime record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// Day worked.
    pub date: NaiveDate,
    /// Hours of overtime.
    pub hours: Decimal,
    /// Hourly rate; defaults to the payroll's hourly rate.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Premium multiplier; defaults to the configured multiplier.
    #[serde(default)]
    pub multiplier: Option<Decimal>,
}

/// One attendance row with clock times as `HH:MM` or `HH:MM:SS`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// Day worked.
    pub date: NaiveDate,
    /// Arrival time.
    pub log_in: String,
    /// Departure time.
    pub log_out: String,
}

/// One leave request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestBody {
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Approval state.
    pub status: LeaveStatus,
}

/// One explicit component.
///
/// `category` must be "Allowance", "Deduction" or "Government Contribution".
/// Which of the optional inputs are required depends on the category and type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentRequest {
    /// Category label.
    pub category: String,
    /// Type label (e.g., "Rice Subsidy", "Late", "SSS").
    #[serde(rename = "type")]
    pub component_type: String,
    /// Requested allowance amount.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Ceiling for a free-form allowance.
    #[serde(default)]
    pub max_amount: Option<Decimal>,
    /// Arrival or departure time for late and undertime.
    #[serde(default)]
    pub time: Option<String>,
    /// Hourly rate for late and undertime; defaults to the payroll's.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Leave days for unpaid leave.
    #[serde(default)]
    pub days: Option<Decimal>,
    /// Daily rate for unpaid leave; defaults to the payroll's.
    #[serde(default)]
    pub daily_rate: Option<Decimal>,
    /// Base salary for a contribution; defaults to the monthly rate.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// Rate for a custom contribution.
    #[serde(default)]
    pub contribution_rate: Option<Decimal>,
    /// Description for a custom contribution.
    #[serde(default)]
    pub description: Option<String>,
}

/// Payroll values a component request falls back on.
#[derive(Debug, Clone, Copy)]
pub struct ComponentDefaults {
    /// Ceilings for the standard allowance kinds.
    pub caps: AllowanceCaps,
    /// Office hours for late and undertime.
    pub policy: AttendancePolicy,
    /// Payroll hourly rate.
    pub hourly_rate: Decimal,
    /// Payroll daily rate.
    pub daily_rate: Decimal,
    /// Payroll monthly rate.
    pub monthly_rate: Decimal,
}

fn required<T>(value: Option<T>, field: &str) -> EngineResult<T> {
    value.ok_or_else(|| EngineError::invalid(field, "Value is required for this component type"))
}

fn is_type(requested: &str, label: &str) -> bool {
    requested.trim().eq_ignore_ascii_case(label)
}

impl ComponentRequest {
    /// Builds the component this request describes for `employee_id`.
    pub fn into_component(
        self,
        employee_id: i64,
        defaults: &ComponentDefaults,
    ) -> EngineResult<PayrollComponent> {
        let category = ComponentCategory::from_str(&self.category)?;
        match category {
            ComponentCategory::Allowance => self.into_allowance(employee_id, defaults),
            ComponentCategory::Deduction => self.into_deduction(employee_id, defaults),
            ComponentCategory::GovernmentContribution => {
                self.into_contribution(employee_id, defaults)
            }
        }
    }

    fn into_allowance(
        self,
        employee_id: i64,
        defaults: &ComponentDefaults,
    ) -> EngineResult<PayrollComponent> {
        let amount = required(self.amount, "amount")?;
        let kind = if is_type(&self.component_type, RICE_SUBSIDY) {
            Some(AllowanceKind::RiceSubsidy)
        } else if is_type(&self.component_type, PHONE_ALLOWANCE) {
            Some(AllowanceKind::Phone)
        } else if is_type(&self.component_type, CLOTHING_ALLOWANCE) {
            Some(AllowanceKind::Clothing)
        } else {
            None
        };

        let allowance = match kind {
            Some(kind) => Allowance::from_caps(employee_id, kind, amount, &defaults.caps)?,
            None => {
                let max_amount = self.max_amount.unwrap_or(amount);
                Allowance::new(employee_id, self.component_type, amount, max_amount)?
            }
        };
        Ok(allowance.into())
    }

    fn into_deduction(
        self,
        employee_id: i64,
        defaults: &ComponentDefaults,
    ) -> EngineResult<PayrollComponent> {
        let hourly_rate = self.hourly_rate.unwrap_or(defaults.hourly_rate);

        let deduction = if is_type(&self.component_type, LATE) {
            let arrival = parse_clock_time("time", &required(self.time, "time")?)?;
            Deduction::late_with_policy(employee_id, arrival, hourly_rate, defaults.policy)?
        } else if is_type(&self.component_type, UNDERTIME) {
            let departure = parse_clock_time("time", &required(self.time, "time")?)?;
            Deduction::undertime_with_policy(employee_id, departure, hourly_rate, defaults.policy)?
        } else if is_type(&self.component_type, UNPAID_LEAVE) {
            let days = required(self.days, "days")?;
            let daily_rate = self.daily_rate.unwrap_or(defaults.daily_rate);
            Deduction::unpaid_leave(employee_id, days, daily_rate)?
        } else {
            return Err(EngineError::invalid(
                "type",
                format!(
                    "Unknown deduction type '{}' (expected {}, {} or {})",
                    self.component_type, LATE, UNDERTIME, UNPAID_LEAVE
                ),
            ));
        };
        Ok(deduction.into())
    }

    fn into_contribution(
        self,
        employee_id: i64,
        defaults: &ComponentDefaults,
    ) -> EngineResult<PayrollComponent> {
        let base_salary = self.base_salary.unwrap_or(defaults.monthly_rate);

        let contribution = if is_type(&self.component_type, SSS) {
            GovernmentContribution::sss(employee_id, base_salary)?
        } else if is_type(&self.component_type, PHILHEALTH) {
            GovernmentContribution::philhealth(employee_id, base_salary)?
        } else if is_type(&self.component_type, PAGIBIG) {
            GovernmentContribution::pagibig(employee_id, base_salary)?
        } else if is_type(&self.component_type, WITHHOLDING_TAX) {
            GovernmentContribution::withholding_tax(employee_id, base_salary)?
        } else {
            let rate = required(self.contribution_rate, "contribution_rate")?;
            GovernmentContribution::new(
                employee_id,
                self.component_type,
                self.description.unwrap_or_default(),
                base_salary,
                rate,
            )?
        };
        Ok(contribution.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_defaults() -> ComponentDefaults {
        ComponentDefaults {
            caps: AllowanceCaps::default(),
            policy: AttendancePolicy::default(),
            hourly_rate: dec("125"),
            daily_rate: dec("1000"),
            monthly_rate: dec("22000"),
        }
    }

    fn component(category: &str, component_type: &str) -> ComponentRequest {
        ComponentRequest {
            category: category.to_string(),
            component_type: component_type.to_string(),
            ..ComponentRequest::default()
        }
    }

    #[test]
    fn test_standard_allowance_uses_configured_cap() {
        let request = ComponentRequest {
            amount: Some(dec("2500")),
            ..component("Allowance", "rice subsidy")
        };
        let built = request.into_component(10001, &create_test_defaults()).unwrap();
        assert_eq!(built.component_type(), "Rice Subsidy");
        assert_eq!(built.amount(), dec("2000"));
    }

    #[test]
    fn test_free_form_allowance_without_cap_is_uncapped() {
        let request = ComponentRequest {
            amount: Some(dec("750")),
            ..component("Allowance", "Transport")
        };
        let built = request.into_component(10001, &create_test_defaults()).unwrap();
        assert_eq!(built.amount(), dec("750"));
    }

    #[test]
    fn test_late_deduction_defaults_to_payroll_rate() {
        let request = ComponentRequest {
            time: Some("08:45".to_string()),
            ..component("Deduction", "Late")
        };
        let built = request.into_component(10001, &create_test_defaults()).unwrap();
        assert_eq!(built.amount(), dec("62.5"));
    }

    #[test]
    fn test_late_deduction_requires_time() {
        let err = component("Deduction", "Late")
            .into_component(10001, &create_test_defaults())
            .unwrap_err();
        assert!(err.to_string().contains("time"));
    }

    #[test]
    fn test_malformed_time_is_rejected() {
        let request = ComponentRequest {
            time: Some("quarter past".to_string()),
            ..component("Deduction", "Undertime")
        };
        assert!(request.into_component(10001, &create_test_defaults()).is_err());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = component("Bonus", "Performance")
            .into_component(10001, &create_test_defaults())
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownCategory { .. }));
    }

    #[test]
    fn test_named_contribution_defaults_to_monthly_rate() {
        let built = component("Government Contribution", "SSS")
            .into_component(10001, &create_test_defaults())
            .unwrap();
        assert_eq!(built.amount(), dec("990"));
    }

    #[test]
    fn test_custom_contribution_requires_rate() {
        assert!(
            component("Government Contribution", "Provident Fund")
                .into_component(10001, &create_test_defaults())
                .is_err()
        );
    }
}
