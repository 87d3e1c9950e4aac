//! BIR monthly withholding tax table (2023 onward).

use rust_decimal::Decimal;

use super::brackets::{Bracket, find_bracket};

/// Tax for one bracket: a base amount plus a rate on the excess over a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRule {
    base_cents: i64,
    rate_basis_points: i64,
    excess_over_cents: i64,
}

impl TaxRule {
    /// Creates a rule.
    pub const fn new(base_cents: i64, rate_basis_points: i64, excess_over_cents: i64) -> Self {
        Self {
            base_cents,
            rate_basis_points,
            excess_over_cents,
        }
    }

    /// Applies the rule to a taxable income inside its bracket.
    pub fn apply(&self, taxable_income: Decimal) -> Decimal {
        let excess = (taxable_income - Decimal::new(self.excess_over_cents, 2)).max(Decimal::ZERO);
        Decimal::new(self.base_cents, 2) + excess * Decimal::new(self.rate_basis_points, 4)
    }
}

/// Monthly compensation withholding schedule.
pub static WITHHOLDING_TAX_TABLE: [Bracket<TaxRule>; 6] = [
    Bracket::new(0, Some(2_083_300), TaxRule::new(0, 0, 0)),
    Bracket::new(2_083_300, Some(3_333_300), TaxRule::new(0, 1_500, 2_083_300)),
    Bracket::new(3_333_300, Some(6_666_700), TaxRule::new(187_500, 2_000, 3_333_300)),
    Bracket::new(6_666_700, Some(16_666_700), TaxRule::new(854_180, 2_500, 6_666_700)),
    Bracket::new(16_666_700, Some(66_666_700), TaxRule::new(3_354_180, 3_000, 16_666_700)),
    Bracket::new(66_666_700, None, TaxRule::new(18_354_180, 3_500, 66_666_700)),
];

/// Monthly withholding tax on `taxable_income`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::withholding_tax;
/// use rust_decimal::Decimal;
///
/// assert_eq!(withholding_tax(Decimal::from(20000)), Decimal::ZERO);
/// assert_eq!(withholding_tax(Decimal::from(30833)), Decimal::from(1500));
/// ```
pub fn withholding_tax(taxable_income: Decimal) -> Decimal {
    let income = taxable_income.max(Decimal::ZERO);
    find_bracket(&WITHHOLDING_TAX_TABLE, income)
        .map_or(Decimal::ZERO, |bracket| bracket.value().apply(income))
}
