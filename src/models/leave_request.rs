//! Leave request record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{EmployeeId, PayPeriod};

/// Kind of leave requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Paid sick leave.
    Sick,
    /// Paid vacation leave.
    Vacation,
    /// Paid emergency leave.
    Emergency,
    /// Leave without pay.
    Unpaid,
}

/// Approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved.
    Approved,
    /// Rejected.
    Rejected,
}

/// A request for leave over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The employee requesting leave.
    pub employee_id: EmployeeId,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Current approval state.
    pub status: LeaveStatus,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

impl LeaveRequest {
    /// Creates a pending leave request.
    pub fn new(
        employee_id: i64,
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: impl Into<String>,
    ) -> EngineResult<Self> {
        let employee_id = EmployeeId::new(employee_id)?;
        if end_date < start_date {
            return Err(EngineError::invalid(
                "end_date",
                "Leave end cannot be before start",
            ));
        }
        Ok(Self {
            employee_id,
            leave_type,
            start_date,
            end_date,
            status: LeaveStatus::Pending,
            reason: reason.into(),
        })
    }

    /// Marks the request approved.
    pub fn approve(&mut self) {
        self.status = LeaveStatus::Approved;
    }

    /// Marks the request rejected.
    pub fn reject(&mut self) {
        self.status = LeaveStatus::Rejected;
    }

    /// Calendar days requested, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Days of approved leave without pay that fall inside `period`.
    ///
    /// Pending or rejected requests, and paid leave types, contribute nothing.
    pub fn unpaid_days(&self, period: &PayPeriod) -> Decimal {
        if self.status != LeaveStatus::Approved || self.leave_type != LeaveType::Unpaid {
            return Decimal::ZERO;
        }

        let start = self.start_date.max(period.start_date());
        let end = self.end_date.min(period.end_date());
        if end < start {
            return Decimal::ZERO;
        }
        Decimal::from((end - start).num_days() + 1)
    }
}
