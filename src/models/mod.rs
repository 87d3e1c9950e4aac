//! Core data models for the payroll engine.
//!
//! These are the validated records the data-access layer hands to the engine,
//! plus the serialisable summary the engine hands back.

mod attendance;
mod employee;
mod leave_request;
mod limits;
mod overtime;
mod pay_period;
mod summary;

pub use attendance::{Attendance, parse_clock_time};
pub use employee::{Employee, EmployeeId, EmploymentStatus, Position};
pub(crate) use employee::{STANDARD_HOURS_PER_DAY, STANDARD_WORKING_DAYS};
pub use leave_request::{LeaveRequest, LeaveStatus, LeaveType};
pub use limits::MAX_AMOUNT;
pub(crate) use limits::{check_max, checked_total};
pub use overtime::Overtime;
pub use pay_period::PayPeriod;
pub use summary::{LineSource, PayrollLine, PayrollSummary, PayrollTotals};
