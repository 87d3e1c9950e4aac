//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! policy from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::{AllowanceCaps, AttendancePolicy, OvertimePolicy, PayrollConfig};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── attendance.yaml   # Office hours and grace period
/// ├── allowances.yaml   # Allowance ceilings
/// └── overtime.yaml     # Overtime multiplier and hour limit
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let policy = loader.attendance_policy();
/// println!("Grace period: {} minutes", policy.grace_minutes);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any of the three files is missing or contains
    /// invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let attendance = Self::load_yaml::<AttendancePolicy>(&path.join("attendance.yaml"))?;
        let allowance_caps = Self::load_yaml::<AllowanceCaps>(&path.join("allowances.yaml"))?;
        let overtime = Self::load_yaml::<OvertimePolicy>(&path.join("overtime.yaml"))?;

        let config = PayrollConfig {
            attendance,
            allowance_caps,
            overtime,
        };
        Self::validate(&config)?;

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> EngineResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(config: &PayrollConfig) -> EngineResult<()> {
        if config.attendance.official_end <= config.attendance.official_start {
            return Err(EngineError::invalid(
                "official_end",
                "Official end must be after official start",
            ));
        }

        let caps = &config.allowance_caps;
        for (field, cap) in [
            ("rice_subsidy", caps.rice_subsidy),
            ("phone", caps.phone),
            ("clothing", caps.clothing),
        ] {
            if cap < Decimal::ZERO {
                return Err(EngineError::invalid(field, "Allowance cap cannot be negative"));
            }
        }

        if config.overtime.default_multiplier <= Decimal::ZERO {
            return Err(EngineError::invalid(
                "default_multiplier",
                "Overtime multiplier must be positive",
            ));
        }
        if config.overtime.max_hours <= Decimal::ZERO {
            return Err(EngineError::invalid("max_hours", "Overtime hour limit must be positive"));
        }

        Ok(())
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the attendance policy.
    pub fn attendance_policy(&self) -> AttendancePolicy {
        self.config.attendance
    }

    /// Returns the allowance ceilings.
    pub fn allowance_caps(&self) -> AllowanceCaps {
        self.config.allowance_caps
    }

    /// Returns the overtime policy.
    pub fn overtime_policy(&self) -> OvertimePolicy {
        self.config.overtime
    }
}
