//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type that bounds a payroll record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Message carried by the error raised when a period ends before it starts.
pub(crate) const PERIOD_ORDER_MESSAGE: &str = "Period end cannot be before start";

/// Represents a pay period with an inclusive date range.
///
/// The end date can never precede the start date; both constructor and
/// setters check this before assigning.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
/// ).unwrap();
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()));
/// assert_eq!(period.calendar_days(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPayPeriod")]
pub struct PayPeriod {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Deserialize)]
struct RawPayPeriod {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<RawPayPeriod> for PayPeriod {
    type Error = EngineError;

    fn try_from(raw: RawPayPeriod) -> Result<Self, Self::Error> {
        PayPeriod::new(raw.start_date, raw.end_date)
    }
}

impl PayPeriod {
    /// Creates a pay period, rejecting an end date before the start date.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        if end_date < start_date {
            return Err(EngineError::invalid("period_end", PERIOD_ORDER_MESSAGE));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// The first day of the period (inclusive).
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// The last day of the period (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns a copy with a new start date, leaving `self` untouched on failure.
    pub fn with_start(&self, start_date: NaiveDate) -> EngineResult<Self> {
        if self.end_date < start_date {
            return Err(EngineError::invalid("period_start", PERIOD_ORDER_MESSAGE));
        }
        Ok(Self {
            start_date,
            end_date: self.end_date,
        })
    }

    /// Returns a copy with a new end date, leaving `self` untouched on failure.
    pub fn with_end(&self, end_date: NaiveDate) -> EngineResult<Self> {
        Self::new(self.start_date, end_date)
    }

    /// Checks if a given date falls within this pay period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of calendar days covered, counting both ends.
    pub fn calendar_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
