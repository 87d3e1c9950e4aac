//! Generic salary bracket and lookup.

use rust_decimal::Decimal;

/// A salary range mapped to a value.
///
/// Bounds are stored in centavos so tables can be `static` data. The lower
/// bound is inclusive and the upper bound exclusive; `None` marks the topmost
/// bracket, unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket<V> {
    lower_cents: i64,
    upper_cents: Option<i64>,
    value: V,
}

impl<V> Bracket<V> {
    /// Creates a bracket covering `[lower, upper)` in centavos.
    pub const fn new(lower_cents: i64, upper_cents: Option<i64>, value: V) -> Self {
        Self {
            lower_cents,
            upper_cents,
            value,
        }
    }

    /// Inclusive lower bound.
    pub fn lower_bound(&self) -> Decimal {
        Decimal::new(self.lower_cents, 2)
    }

    /// Exclusive upper bound, or `None` for the top bracket.
    pub fn upper_bound(&self) -> Option<Decimal> {
        self.upper_cents.map(|cents| Decimal::new(cents, 2))
    }

    /// The value this bracket maps to.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Whether `salary` falls inside this bracket.
    pub fn contains(&self, salary: Decimal) -> bool {
        salary >= self.lower_bound() && self.upper_bound().is_none_or(|upper| salary < upper)
    }
}

/// Finds the bracket containing `salary` in a table ordered by lower bound.
///
/// Returns `None` when `salary` is below the first bracket or falls in a gap.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{Bracket, find_bracket};
/// use rust_decimal::Decimal;
///
/// static TABLE: [Bracket<&str>; 2] = [
///     Bracket::new(0, Some(100_000), "low"),
///     Bracket::new(100_000, None, "high"),
/// ];
///
/// assert_eq!(find_bracket(&TABLE, Decimal::from(999)).map(|b| *b.value()), Some("low"));
/// assert_eq!(find_bracket(&TABLE, Decimal::from(1000)).map(|b| *b.value()), Some("high"));
/// assert!(find_bracket(&TABLE, Decimal::from(-1)).is_none());
/// ```
pub fn find_bracket<V>(table: &[Bracket<V>], salary: Decimal) -> Option<&Bracket<V>> {
    let index = table.partition_point(|bracket| bracket.lower_bound() <= salary);
    index
        .checked_sub(1)
        .and_then(|i| table.get(i))
        .filter(|bracket| bracket.contains(salary))
}
