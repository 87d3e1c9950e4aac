//! Payroll components: the monetary line items attached to a payroll.
//!
//! A [`PayrollComponent`] is one of three variants, each carrying only the
//! inputs its own rule needs:
//!
//! - [`Allowance`] adds to gross pay and is clamped to a ceiling.
//! - [`Deduction`] subtracts an amount derived from a clock time or leave days.
//! - [`GovernmentContribution`] subtracts a statutory amount read from a
//!   bracket table, or `base_salary × contribution_rate` for custom schemes.

mod allowance;
mod component;
mod deduction;
mod government;

pub use allowance::{
    Allowance, AllowanceKind, CLOTHING_ALLOWANCE, PHONE_ALLOWANCE, RICE_SUBSIDY,
};
pub use component::{ComponentCategory, PayrollComponent};
pub use deduction::{Deduction, DeductionRule, LATE, UNDERTIME, UNPAID_LEAVE};
pub use government::{
    ContributionScheme, GovernmentContribution, PAGIBIG, PHILHEALTH, SSS, WITHHOLDING_TAX,
};
