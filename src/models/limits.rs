//! Magnitude limits for monetary and quantity inputs.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Largest amount, rate, day count or hour count the engine accepts: one
/// trillion.
///
/// A line built from inputs under this limit stays inside `Decimal` range;
/// running totals are still added with [`Decimal::checked_add`].
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Rejects `value` when it exceeds [`MAX_AMOUNT`].
pub(crate) fn check_max(field: &str, value: Decimal) -> EngineResult<()> {
    if value > MAX_AMOUNT {
        return Err(EngineError::invalid(field, format!("Value cannot exceed {}", MAX_AMOUNT)));
    }
    Ok(())
}

/// Adds two running totals, failing instead of overflowing.
pub(crate) fn checked_total(field: &str, a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_add(b).ok_or_else(|| EngineError::invalid(field, "Total is out of range"))
}
