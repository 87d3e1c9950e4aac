//! Government contributions.
//!
//! Custom schemes compute `base_salary × contribution_rate`. The named
//! statutory schemes ignore the caller's rate: they look the amount up in a
//! bracket table and store the effective rate that results.

use rust_decimal::Decimal;

use crate::calculation::{
    pagibig_employee_contribution, philhealth_employee_share, sss_employee_contribution,
    withholding_tax,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeId, check_max};

/// Type label of the SSS contribution.
pub const SSS: &str = "SSS";
/// Type label of the PhilHealth premium.
pub const PHILHEALTH: &str = "PhilHealth";
/// Type label of the Pag-IBIG contribution.
pub const PAGIBIG: &str = "Pag-IBIG";
/// Type label of the withholding tax.
pub const WITHHOLDING_TAX: &str = "Withholding Tax";

/// The scheme a contribution is computed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContributionScheme {
    /// Social Security System bracket table.
    Sss,
    /// PhilHealth premium table.
    PhilHealth,
    /// Pag-IBIG rate table.
    PagIbig,
    /// BIR withholding tax table.
    WithholdingTax,
    /// A flat-rate scheme defined by the caller.
    Custom {
        /// Type label.
        label: String,
        /// Long-form description.
        description: String,
    },
}

impl ContributionScheme {
    /// The type label.
    pub fn label(&self) -> &str {
        match self {
            ContributionScheme::Sss => SSS,
            ContributionScheme::PhilHealth => PHILHEALTH,
            ContributionScheme::PagIbig => PAGIBIG,
            ContributionScheme::WithholdingTax => WITHHOLDING_TAX,
            ContributionScheme::Custom { label, .. } => label,
        }
    }

    /// The long-form name of the scheme.
    pub fn description(&self) -> &str {
        match self {
            ContributionScheme::Sss => "Social Security System (SSS) employee contribution",
            ContributionScheme::PhilHealth => {
                "Philippine Health Insurance Corporation (PhilHealth) employee premium share"
            }
            ContributionScheme::PagIbig => {
                "Home Development Mutual Fund (Pag-IBIG) employee contribution"
            }
            ContributionScheme::WithholdingTax => "Bureau of Internal Revenue withholding tax",
            ContributionScheme::Custom { description, .. } => description,
        }
    }

    fn bracket_amount(&self, base_salary: Decimal) -> Option<Decimal> {
        match self {
            ContributionScheme::Sss => Some(sss_employee_contribution(base_salary)),
            ContributionScheme::PhilHealth => Some(philhealth_employee_share(base_salary)),
            ContributionScheme::PagIbig => Some(pagibig_employee_contribution(base_salary)),
            ContributionScheme::WithholdingTax => Some(withholding_tax(base_salary)),
            ContributionScheme::Custom { .. } => None,
        }
    }
}

/// A statutory deduction computed from a base salary.
///
/// # Example
///
/// ```
/// use payroll_engine::components::GovernmentContribution;
/// use rust_decimal::Decimal;
///
/// let sss = GovernmentContribution::sss(10001, Decimal::from(6000)).unwrap();
/// assert_eq!(sss.component_type(), "SSS");
/// assert_eq!(sss.amount(), Decimal::from(270));
/// assert!(sss.description().contains("Social Security System"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernmentContribution {
    employee_id: EmployeeId,
    scheme: ContributionScheme,
    base_salary: Decimal,
    contribution_rate: Decimal,
    amount: Decimal,
}

impl GovernmentContribution {
    fn build(
        employee_id: i64,
        scheme: ContributionScheme,
        base_salary: Decimal,
        contribution_rate: Decimal,
    ) -> EngineResult<Self> {
        let employee_id = EmployeeId::new(employee_id)?;
        Self::check_base_salary(base_salary)?;
        Self::check_rate(contribution_rate)?;

        let mut contribution = Self {
            employee_id,
            scheme,
            base_salary,
            contribution_rate,
            amount: Decimal::ZERO,
        };
        contribution.calculate();
        Ok(contribution)
    }

    fn check_base_salary(base_salary: Decimal) -> EngineResult<()> {
        if base_salary < Decimal::ZERO {
            return Err(EngineError::invalid("base_salary", "Base salary cannot be negative"));
        }
        check_max("base_salary", base_salary)
    }

    fn check_rate(rate: Decimal) -> EngineResult<()> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(EngineError::invalid(
                "contribution_rate",
                "Contribution rate must be between 0 and 1",
            ));
        }
        Ok(())
    }

    /// A flat-rate contribution: `amount = base_salary × contribution_rate`.
    pub fn new(
        employee_id: i64,
        label: impl Into<String>,
        description: impl Into<String>,
        base_salary: Decimal,
        contribution_rate: Decimal,
    ) -> EngineResult<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(EngineError::invalid("type", "Contribution type cannot be empty"));
        }
        let scheme = ContributionScheme::Custom {
            label,
            description: description.into(),
        };
        Self::build(employee_id, scheme, base_salary, contribution_rate)
    }

    /// SSS employee contribution for a monthly salary.
    pub fn sss(employee_id: i64, salary: Decimal) -> EngineResult<Self> {
        Self::build(employee_id, ContributionScheme::Sss, salary, Decimal::ZERO)
    }

    /// PhilHealth employee premium share for a monthly salary.
    pub fn philhealth(employee_id: i64, salary: Decimal) -> EngineResult<Self> {
        Self::build(employee_id, ContributionScheme::PhilHealth, salary, Decimal::ZERO)
    }

    /// Pag-IBIG employee contribution for a monthly salary.
    pub fn pagibig(employee_id: i64, salary: Decimal) -> EngineResult<Self> {
        Self::build(employee_id, ContributionScheme::PagIbig, salary, Decimal::ZERO)
    }

    /// Monthly withholding tax on a taxable income.
    pub fn withholding_tax(employee_id: i64, taxable_income: Decimal) -> EngineResult<Self> {
        Self::build(
            employee_id,
            ContributionScheme::WithholdingTax,
            taxable_income,
            Decimal::ZERO,
        )
    }

    /// Changes the base salary. Call [`calculate`](Self::calculate) afterwards.
    pub fn set_base_salary(&mut self, base_salary: Decimal) -> EngineResult<()> {
        Self::check_base_salary(base_salary)?;
        self.base_salary = base_salary;
        Ok(())
    }

    /// Changes the rate. Named schemes overwrite it on the next
    /// [`calculate`](Self::calculate).
    pub fn set_contribution_rate(&mut self, contribution_rate: Decimal) -> EngineResult<()> {
        Self::check_rate(contribution_rate)?;
        self.contribution_rate = contribution_rate;
        Ok(())
    }

    /// Recomputes the amount. Idempotent.
    pub fn calculate(&mut self) {
        match self.scheme.bracket_amount(self.base_salary) {
            Some(amount) => {
                self.amount = amount;
                self.contribution_rate = if self.base_salary.is_zero() {
                    Decimal::ZERO
                } else {
                    amount / self.base_salary
                };
            }
            None => self.amount = self.base_salary * self.contribution_rate,
        }
    }

    /// The employee the contribution is withheld from.
    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// The scheme in force.
    pub fn scheme(&self) -> &ContributionScheme {
        &self.scheme
    }

    /// The type label, e.g. "SSS".
    pub fn component_type(&self) -> &str {
        self.scheme.label()
    }

    /// The long-form name of the scheme.
    pub fn description(&self) -> &str {
        self.scheme.description()
    }

    /// The salary the contribution is computed on.
    pub fn base_salary(&self) -> Decimal {
        self.base_salary
    }

    /// The rate in force; for named schemes, the effective rate of the last lookup.
    pub fn contribution_rate(&self) -> Decimal {
        self.contribution_rate
    }

    /// The contribution amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}
