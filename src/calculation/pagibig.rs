//! Pag-IBIG (Home Development Mutual Fund) contribution table.
//!
//! The employee rate is 1% for salaries below 1,500 and 2% at or above it;
//! the employer rate is 2% throughout. Both rates apply to the salary capped
//! at the maximum fund salary.

use rust_decimal::Decimal;

use super::brackets::{Bracket, find_bracket};

/// Salary ceiling for Pag-IBIG contributions.
pub const PAGIBIG_MAX_FUND_SALARY: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Employee and employer rates for one bracket, in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagIbigRates {
    employee_basis_points: i64,
    employer_basis_points: i64,
}

impl PagIbigRates {
    /// Creates a rate pair.
    pub const fn new(employee_basis_points: i64, employer_basis_points: i64) -> Self {
        Self {
            employee_basis_points,
            employer_basis_points,
        }
    }

    /// Employee rate as a fraction.
    pub fn employee_rate(&self) -> Decimal {
        Decimal::new(self.employee_basis_points, 4)
    }

    /// Employer rate as a fraction.
    pub fn employer_rate(&self) -> Decimal {
        Decimal::new(self.employer_basis_points, 4)
    }
}

/// Pag-IBIG schedule.
pub static PAGIBIG_TABLE: [Bracket<PagIbigRates>; 2] = [
    Bracket::new(0, Some(150_000), PagIbigRates::new(100, 200)),
    Bracket::new(150_000, None, PagIbigRates::new(200, 200)),
];

fn rates(salary: Decimal) -> Option<&'static PagIbigRates> {
    find_bracket(&PAGIBIG_TABLE, salary.max(Decimal::ZERO)).map(Bracket::value)
}

fn contribution_base(salary: Decimal) -> Decimal {
    salary.max(Decimal::ZERO).min(PAGIBIG_MAX_FUND_SALARY)
}

/// Employee rate selected by `salary`.
pub fn pagibig_employee_rate(salary: Decimal) -> Decimal {
    rates(salary).map_or(Decimal::ZERO, PagIbigRates::employee_rate)
}

/// Employer rate selected by `salary`.
pub fn pagibig_employer_rate(salary: Decimal) -> Decimal {
    rates(salary).map_or(Decimal::ZERO, PagIbigRates::employer_rate)
}

/// The employee's monthly contribution.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::pagibig_employee_contribution;
/// use rust_decimal::Decimal;
///
/// assert_eq!(pagibig_employee_contribution(Decimal::from(6000)), Decimal::from(120));
/// assert_eq!(pagibig_employee_contribution(Decimal::from(50000)), Decimal::from(200));
/// ```
pub fn pagibig_employee_contribution(salary: Decimal) -> Decimal {
    contribution_base(salary) * pagibig_employee_rate(salary)
}

/// The employer's monthly contribution.
pub fn pagibig_employer_contribution(salary: Decimal) -> Decimal {
    contribution_base(salary) * pagibig_employer_rate(salary)
}
