//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const DEFAULT_OFFICIAL_START: NaiveTime = match NaiveTime::from_hms_opt(8, 0, 0) {
    Some(time) => time,
    None => panic!("08:00:00 is a valid time"),
};

const DEFAULT_OFFICIAL_END: NaiveTime = match NaiveTime::from_hms_opt(17, 0, 0) {
    Some(time) => time,
    None => panic!("17:00:00 is a valid time"),
};

/// Office hours that drive late and undertime deductions.
///
/// Arrivals up to `grace_minutes` after `official_start` are not late.
/// Departures before `official_end` are undertime; there is no grace at the
/// end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePolicy {
    /// The start of the working day.
    pub official_start: NaiveTime,
    /// Minutes after `official_start` before lateness is deducted.
    pub grace_minutes: u32,
    /// The end of the working day.
    pub official_end: NaiveTime,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            official_start: DEFAULT_OFFICIAL_START,
            grace_minutes: 15,
            official_end: DEFAULT_OFFICIAL_END,
        }
    }
}

/// Monthly ceilings for the standard allowance kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceCaps {
    /// Ceiling for the rice subsidy.
    pub rice_subsidy: Decimal,
    /// Ceiling for the phone allowance.
    pub phone: Decimal,
    /// Ceiling for the clothing allowance.
    pub clothing: Decimal,
}

impl Default for AllowanceCaps {
    fn default() -> Self {
        Self {
            rice_subsidy: Decimal::from_parts(2000, 0, 0, false, 0),
            phone: Decimal::from_parts(3000, 0, 0, false, 0),
            clothing: Decimal::from_parts(1500, 0, 0, false, 0),
        }
    }
}

/// Limits and defaults applied to overtime records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePolicy {
    /// Multiplier used when an overtime record does not carry its own.
    pub default_multiplier: Decimal,
    /// The largest number of hours a single overtime record may claim.
    pub max_hours: Decimal,
}

impl Default for OvertimePolicy {
    fn default() -> Self {
        Self {
            default_multiplier: Decimal::from_parts(125, 0, 0, false, 2),
            max_hours: Decimal::from_parts(24, 0, 0, false, 0),
        }
    }
}

/// The complete payroll configuration.
///
/// Aggregates every policy section loaded from the YAML files in a
/// configuration directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Office hours for attendance deductions.
    pub attendance: AttendancePolicy,
    /// Allowance ceilings.
    pub allowance_caps: AllowanceCaps,
    /// Overtime limits.
    pub overtime: OvertimePolicy,
}
