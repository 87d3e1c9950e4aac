//! Statutory rate tables and pure lookups.
//!
//! This module holds the static bracket tables for the Social Security
//! System, PhilHealth, Pag-IBIG and BIR withholding tax, together with the
//! pure functions that read them. Tables are ordered arrays of salary ranges;
//! adding a bracket never touches calculation code.

mod brackets;
mod pagibig;
mod philhealth;
mod sss;
mod withholding_tax;

pub use brackets::{Bracket, find_bracket};
pub use pagibig::{
    PAGIBIG_MAX_FUND_SALARY, PAGIBIG_TABLE, PagIbigRates, pagibig_employee_contribution,
    pagibig_employee_rate, pagibig_employer_contribution, pagibig_employer_rate,
};
pub use philhealth::{
    PHILHEALTH_TABLE, PremiumRule, philhealth_employee_share, philhealth_employer_contribution,
    philhealth_monthly_premium,
};
pub use sss::{
    SSS_TABLE, SssContribution, sss_employee_contribution, sss_employer_contribution,
    sss_salary_credit,
};
pub use withholding_tax::{TaxRule, WITHHOLDING_TAX_TABLE, withholding_tax};
