//! Payroll summary models.
//!
//! A [`PayrollSummary`] is the serialisable output of one payroll
//! recalculation: the period, the auditable sub-totals, and one line per
//! amount that was actually counted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::components::ComponentCategory;

use super::{EmployeeId, PayPeriod};

/// Where a summary line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSource {
    /// A component added to the payroll's buckets.
    Component,
    /// A directly-set payroll field (e.g. `rice_subsidy`, `sss`).
    Field,
}

/// One counted amount on a payroll.
///
/// # Example
///
/// ```
/// use payroll_engine::components::ComponentCategory;
/// use payroll_engine::models::{LineSource, PayrollLine};
/// use rust_decimal::Decimal;
///
/// let line = PayrollLine {
///     category: ComponentCategory::Allowance,
///     component_type: "Rice Subsidy".to_string(),
///     amount: Decimal::from(1500),
///     description: None,
///     source: LineSource::Field,
/// };
/// assert!(line.category.is_positive());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    /// The bucket the amount belongs to.
    pub category: ComponentCategory,
    /// The type label (e.g., "Rice Subsidy", "SSS").
    #[serde(rename = "type")]
    pub component_type: String,
    /// The magnitude; the category decides the sign.
    pub amount: Decimal,
    /// Long-form description, for government contributions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Component or direct field.
    pub source: LineSource,
}

/// Sub-totals of a payroll recalculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Prorated salary for the days worked.
    pub basic_pay: Decimal,
    /// Overtime pay for the period.
    pub overtime_pay: Decimal,
    /// Sum of counted allowances.
    pub allowances_total: Decimal,
    /// Sum of counted attendance and leave deductions.
    pub deductions_total: Decimal,
    /// Sum of counted government contributions.
    pub contributions_total: Decimal,
    /// Basic pay + overtime pay + allowances.
    pub gross_pay: Decimal,
    /// Deductions + contributions.
    pub total_deductions: Decimal,
    /// Gross pay minus total deductions.
    pub net_pay: Decimal,
}

/// The complete, serialisable result of a payroll recalculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Persistence identifier, when the payroll has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payroll_id: Option<i64>,
    /// The employee paid.
    pub employee_id: EmployeeId,
    /// The pay period.
    pub period: PayPeriod,
    /// Monthly basic salary.
    pub monthly_rate: Decimal,
    /// Days worked in the period.
    pub days_worked: Decimal,
    /// Overtime hours in the period.
    pub overtime_hours: Decimal,
    /// Sub-totals.
    pub totals: PayrollTotals,
    /// Every counted amount.
    pub lines: Vec<PayrollLine>,
}

impl PayrollSummary {
    /// Lines in `category`, in the order they were counted.
    pub fn lines_in(&self, category: ComponentCategory) -> impl Iterator<Item = &PayrollLine> {
        self.lines.iter().filter(move |line| line.category == category)
    }
}
