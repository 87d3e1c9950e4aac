//! The component sum type and its categories.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::EmployeeId;

use super::{Allowance, Deduction, GovernmentContribution};

/// The bucket a component is filed under on a payroll.
///
/// # Example
///
/// ```
/// use payroll_engine::components::ComponentCategory;
/// use std::str::FromStr;
///
/// let category = ComponentCategory::from_str("Government Contribution").unwrap();
/// assert_eq!(category, ComponentCategory::GovernmentContribution);
/// assert!(ComponentCategory::from_str("Bonus").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentCategory {
    /// Additions to gross pay.
    #[serde(rename = "Allowance")]
    Allowance,
    /// Attendance and leave deductions.
    #[serde(rename = "Deduction")]
    Deduction,
    /// Statutory contributions and withholding.
    #[serde(rename = "Government Contribution")]
    GovernmentContribution,
}

impl ComponentCategory {
    /// Every category, in bucketing order.
    pub const ALL: [ComponentCategory; 3] = [
        ComponentCategory::Allowance,
        ComponentCategory::Deduction,
        ComponentCategory::GovernmentContribution,
    ];

    /// The constant label for this category.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentCategory::Allowance => "Allowance",
            ComponentCategory::Deduction => "Deduction",
            ComponentCategory::GovernmentContribution => "Government Contribution",
        }
    }

    /// Whether components in this category add to gross pay.
    pub fn is_positive(&self) -> bool {
        matches!(self, ComponentCategory::Allowance)
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a category label, ignoring case and surrounding whitespace.
///
/// Any other label fails with [`EngineError::UnknownCategory`], which is the
/// invalid-argument case for category labels: callers that handle
/// [`EngineError::InvalidArgument`] should handle it the same way.
impl FromStr for ComponentCategory {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ComponentCategory::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EngineError::UnknownCategory {
                category: s.to_string(),
            })
    }
}

/// One monetary line item on a payroll.
///
/// Dispatch is by variant: `calculate` re-runs the variant's rule, and the
/// category decides whether the amount is added to or subtracted from gross pay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayrollComponent {
    /// A capped allowance.
    Allowance(Allowance),
    /// A time- or leave-based deduction.
    Deduction(Deduction),
    /// A statutory contribution.
    GovernmentContribution(GovernmentContribution),
}

impl PayrollComponent {
    /// Re-applies the variant's rule to its inputs. Idempotent.
    pub fn calculate(&mut self) {
        match self {
            PayrollComponent::Allowance(allowance) => allowance.calculate(),
            PayrollComponent::Deduction(deduction) => deduction.calculate(),
            PayrollComponent::GovernmentContribution(contribution) => contribution.calculate(),
        }
    }

    /// The bucket this component belongs to.
    pub fn category(&self) -> ComponentCategory {
        match self {
            PayrollComponent::Allowance(_) => ComponentCategory::Allowance,
            PayrollComponent::Deduction(_) => ComponentCategory::Deduction,
            PayrollComponent::GovernmentContribution(_) => {
                ComponentCategory::GovernmentContribution
            }
        }
    }

    /// `true` for allowances, `false` for deductions and contributions.
    pub fn is_positive_amount(&self) -> bool {
        self.category().is_positive()
    }

    /// The employee the component was built for.
    pub fn employee_id(&self) -> EmployeeId {
        match self {
            PayrollComponent::Allowance(allowance) => allowance.employee_id(),
            PayrollComponent::Deduction(deduction) => deduction.employee_id(),
            PayrollComponent::GovernmentContribution(contribution) => contribution.employee_id(),
        }
    }

    /// The type label, e.g. "Rice Subsidy" or "SSS".
    pub fn component_type(&self) -> &str {
        match self {
            PayrollComponent::Allowance(allowance) => allowance.component_type(),
            PayrollComponent::Deduction(deduction) => deduction.component_type(),
            PayrollComponent::GovernmentContribution(contribution) => {
                contribution.component_type()
            }
        }
    }

    /// The magnitude of the component; the sign comes from the category.
    pub fn amount(&self) -> Decimal {
        match self {
            PayrollComponent::Allowance(allowance) => allowance.amount(),
            PayrollComponent::Deduction(deduction) => deduction.amount(),
            PayrollComponent::GovernmentContribution(contribution) => contribution.amount(),
        }
    }

    /// Long-form description, present only for government contributions.
    pub fn description(&self) -> Option<&str> {
        match self {
            PayrollComponent::GovernmentContribution(contribution) => {
                Some(contribution.description())
            }
            _ => None,
        }
    }

    /// Human-readable summary, e.g. "Rice Subsidy (Allowance): 1500.00".
    pub fn display_name(&self) -> String {
        format!(
            "{} ({}): {:.2}",
            self.component_type(),
            self.category(),
            self.amount()
        )
    }
}

impl From<Allowance> for PayrollComponent {
    fn from(allowance: Allowance) -> Self {
        PayrollComponent::Allowance(allowance)
    }
}

impl From<Deduction> for PayrollComponent {
    fn from(deduction: Deduction) -> Self {
        PayrollComponent::Deduction(deduction)
    }
}

impl From<GovernmentContribution> for PayrollComponent {
    fn from(contribution: GovernmentContribution) -> Self {
        PayrollComponent::GovernmentContribution(contribution)
    }
}
