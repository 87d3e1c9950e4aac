//! PhilHealth premium table.
//!
//! The monthly premium is 5% of the basic salary, with the salary floored at
//! 10,000 and capped at 100,000. Employer and employee split the premium
//! equally.

use rust_decimal::Decimal;

use super::brackets::{Bracket, find_bracket};

const TWO: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// How a PhilHealth bracket turns a salary into a monthly premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumRule {
    /// A fixed premium, in centavos.
    Fixed(i64),
    /// A percentage of salary, in basis points.
    Percentage(i64),
}

impl PremiumRule {
    /// Applies the rule to `salary`.
    pub fn apply(&self, salary: Decimal) -> Decimal {
        match *self {
            PremiumRule::Fixed(cents) => Decimal::new(cents, 2),
            PremiumRule::Percentage(basis_points) => salary * Decimal::new(basis_points, 4),
        }
    }
}

/// PhilHealth schedule: floor, percentage band, ceiling.
pub static PHILHEALTH_TABLE: [Bracket<PremiumRule>; 3] = [
    Bracket::new(0, Some(1_000_000), PremiumRule::Fixed(50_000)),
    Bracket::new(1_000_000, Some(10_000_000), PremiumRule::Percentage(500)),
    Bracket::new(10_000_000, None, PremiumRule::Fixed(500_000)),
];

/// The total monthly premium for `salary`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::philhealth_monthly_premium;
/// use rust_decimal::Decimal;
///
/// assert_eq!(philhealth_monthly_premium(Decimal::from(30000)), Decimal::from(1500));
/// ```
pub fn philhealth_monthly_premium(salary: Decimal) -> Decimal {
    let salary = salary.max(Decimal::ZERO);
    find_bracket(&PHILHEALTH_TABLE, salary).map_or(Decimal::ZERO, |bracket| {
        bracket.value().apply(salary)
    })
}

/// The employer's half of the monthly premium.
pub fn philhealth_employer_contribution(salary: Decimal) -> Decimal {
    philhealth_monthly_premium(salary) / TWO
}

/// The employee's half of the monthly premium.
pub fn philhealth_employee_share(salary: Decimal) -> Decimal {
    philhealth_monthly_premium(salary) - philhealth_employer_contribution(salary)
}
