//! Social Security System contribution table.
//!
//! Each bracket maps a range of monthly compensation to a monthly salary
//! credit (the bracket's representative salary) and to fixed employee and
//! employer shares. The employer share includes the Employees' Compensation
//! premium.

use rust_decimal::Decimal;

use super::brackets::{Bracket, find_bracket};

/// Contribution figures for one SSS bracket, in centavos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SssContribution {
    salary_credit_cents: i64,
    employee_cents: i64,
    employer_cents: i64,
}

impl SssContribution {
    /// Creates a row from its salary credit and shares.
    pub const fn new(salary_credit_cents: i64, employee_cents: i64, employer_cents: i64) -> Self {
        Self {
            salary_credit_cents,
            employee_cents,
            employer_cents,
        }
    }

    /// The monthly salary credit.
    pub fn salary_credit(&self) -> Decimal {
        Decimal::new(self.salary_credit_cents, 2)
    }

    /// The employee share.
    pub fn employee_share(&self) -> Decimal {
        Decimal::new(self.employee_cents, 2)
    }

    /// The employer share, including the EC premium.
    pub fn employer_share(&self) -> Decimal {
        Decimal::new(self.employer_cents, 2)
    }
}

/// SSS schedule: 4.5% employee and 8.5% employer on a salary credit from
/// 3,000 to 25,000 in steps of 500.
pub static SSS_TABLE: [Bracket<SssContribution>; 45] = [
    Bracket::new(0, Some(325_000), SssContribution::new(300_000, 13_500, 26_500)),
    Bracket::new(325_000, Some(375_000), SssContribution::new(350_000, 15_750, 30_750)),
    Bracket::new(375_000, Some(425_000), SssContribution::new(400_000, 18_000, 35_000)),
    Bracket::new(425_000, Some(475_000), SssContribution::new(450_000, 20_250, 39_250)),
    Bracket::new(475_000, Some(525_000), SssContribution::new(500_000, 22_500, 43_500)),
    Bracket::new(525_000, Some(575_000), SssContribution::new(550_000, 24_750, 47_750)),
    Bracket::new(575_000, Some(625_000), SssContribution::new(600_000, 27_000, 52_000)),
    Bracket::new(625_000, Some(675_000), SssContribution::new(650_000, 29_250, 56_250)),
    Bracket::new(675_000, Some(725_000), SssContribution::new(700_000, 31_500, 60_500)),
    Bracket::new(725_000, Some(775_000), SssContribution::new(750_000, 33_750, 64_750)),
    Bracket::new(775_000, Some(825_000), SssContribution::new(800_000, 36_000, 69_000)),
    Bracket::new(825_000, Some(875_000), SssContribution::new(850_000, 38_250, 73_250)),
    Bracket::new(875_000, Some(925_000), SssContribution::new(900_000, 40_500, 77_500)),
    Bracket::new(925_000, Some(975_000), SssContribution::new(950_000, 42_750, 81_750)),
    Bracket::new(975_000, Some(1_025_000), SssContribution::new(1_000_000, 45_000, 86_000)),
    Bracket::new(1_025_000, Some(1_075_000), SssContribution::new(1_050_000, 47_250, 90_250)),
    Bracket::new(1_075_000, Some(1_125_000), SssContribution::new(1_100_000, 49_500, 94_500)),
    Bracket::new(1_125_000, Some(1_175_000), SssContribution::new(1_150_000, 51_750, 98_750)),
    Bracket::new(1_175_000, Some(1_225_000), SssContribution::new(1_200_000, 54_000, 103_000)),
    Bracket::new(1_225_000, Some(1_275_000), SssContribution::new(1_250_000, 56_250, 107_250)),
    Bracket::new(1_275_000, Some(1_325_000), SssContribution::new(1_300_000, 58_500, 111_500)),
    Bracket::new(1_325_000, Some(1_375_000), SssContribution::new(1_350_000, 60_750, 115_750)),
    Bracket::new(1_375_000, Some(1_425_000), SssContribution::new(1_400_000, 63_000, 120_000)),
    Bracket::new(1_425_000, Some(1_475_000), SssContribution::new(1_450_000, 65_250, 124_250)),
    Bracket::new(1_475_000, Some(1_525_000), SssContribution::new(1_500_000, 67_500, 130_500)),
    Bracket::new(1_525_000, Some(1_575_000), SssContribution::new(1_550_000, 69_750, 134_750)),
    Bracket::new(1_575_000, Some(1_625_000), SssContribution::new(1_600_000, 72_000, 139_000)),
    Bracket::new(1_625_000, Some(1_675_000), SssContribution::new(1_650_000, 74_250, 143_250)),
    Bracket::new(1_675_000, Some(1_725_000), SssContribution::new(1_700_000, 76_500, 147_500)),
    Bracket::new(1_725_000, Some(1_775_000), SssContribution::new(1_750_000, 78_750, 151_750)),
    Bracket::new(1_775_000, Some(1_825_000), SssContribution::new(1_800_000, 81_000, 156_000)),
    Bracket::new(1_825_000, Some(1_875_000), SssContribution::new(1_850_000, 83_250, 160_250)),
    Bracket::new(1_875_000, Some(1_925_000), SssContribution::new(1_900_000, 85_500, 164_500)),
    Bracket::new(1_925_000, Some(1_975_000), SssContribution::new(1_950_000, 87_750, 168_750)),
    Bracket::new(1_975_000, Some(2_025_000), SssContribution::new(2_000_000, 90_000, 173_000)),
    Bracket::new(2_025_000, Some(2_075_000), SssContribution::new(2_050_000, 92_250, 177_250)),
    Bracket::new(2_075_000, Some(2_125_000), SssContribution::new(2_100_000, 94_500, 181_500)),
    Bracket::new(2_125_000, Some(2_175_000), SssContribution::new(2_150_000, 96_750, 185_750)),
    Bracket::new(2_175_000, Some(2_225_000), SssContribution::new(2_200_000, 99_000, 190_000)),
    Bracket::new(2_225_000, Some(2_275_000), SssContribution::new(2_250_000, 101_250, 194_250)),
    Bracket::new(2_275_000, Some(2_325_000), SssContribution::new(2_300_000, 103_500, 198_500)),
    Bracket::new(2_325_000, Some(2_375_000), SssContribution::new(2_350_000, 105_750, 202_750)),
    Bracket::new(2_375_000, Some(2_425_000), SssContribution::new(2_400_000, 108_000, 207_000)),
    Bracket::new(2_425_000, Some(2_475_000), SssContribution::new(2_450_000, 110_250, 211_250)),
    Bracket::new(2_475_000, None, SssContribution::new(2_500_000, 112_500, 215_500)),
];

fn sss_row(salary: Decimal) -> Option<&'static SssContribution> {
    find_bracket(&SSS_TABLE, salary.max(Decimal::ZERO)).map(Bracket::value)
}

/// The monthly salary credit for `salary`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::sss_salary_credit;
/// use rust_decimal::Decimal;
///
/// assert_eq!(sss_salary_credit(Decimal::from(6000)), Decimal::from(6000));
/// assert_eq!(sss_salary_credit(Decimal::from(40000)), Decimal::from(25000));
/// ```
pub fn sss_salary_credit(salary: Decimal) -> Decimal {
    sss_row(salary).map_or(Decimal::ZERO, SssContribution::salary_credit)
}

/// The employee's monthly SSS contribution for `salary`.
pub fn sss_employee_contribution(salary: Decimal) -> Decimal {
    sss_row(salary).map_or(Decimal::ZERO, SssContribution::employee_share)
}

/// The employer's monthly SSS contribution for `salary`.
pub fn sss_employer_contribution(salary: Decimal) -> Decimal {
    sss_row(salary).map_or(Decimal::ZERO, SssContribution::employer_share)
}
