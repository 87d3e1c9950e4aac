//! Configuration loading and management for the payroll engine.
//!
//! This module provides the tunable policy the engine applies: attendance
//! thresholds for late and undertime deductions, allowance ceilings, and
//! overtime limits. Built-in defaults are available through
//! [`PayrollConfig::default`]; a directory of YAML files can override them.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Office opens at {}", loader.config().attendance.official_start);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AllowanceCaps, AttendancePolicy, OvertimePolicy, PayrollConfig};
