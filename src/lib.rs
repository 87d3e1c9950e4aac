//! Payroll Engine for Philippine Semi-Monthly Payroll
//!
//! This crate computes an employee's pay for a period from independently
//! validated components (capped allowances, attendance deductions and
//! statutory contributions looked up in bracket tables) and folds them into
//! gross pay, total deductions and net pay.
//!
//! The engine performs no I/O. The [`api`] module wraps it in an HTTP
//! endpoint for callers that want one.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod payroll;
