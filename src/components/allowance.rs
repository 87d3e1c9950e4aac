//! Capped allowances.
//!
//! Every allowance carries a ceiling. A requested amount above the ceiling is
//! silently clamped to it; this is a business rule, not a validation failure.

use rust_decimal::Decimal;

use crate::config::AllowanceCaps;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeId, check_max};

/// Type label of the rice subsidy.
pub const RICE_SUBSIDY: &str = "Rice Subsidy";
/// Type label of the phone allowance.
pub const PHONE_ALLOWANCE: &str = "Phone Allowance";
/// Type label of the clothing allowance.
pub const CLOTHING_ALLOWANCE: &str = "Clothing Allowance";

/// The kind of allowance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AllowanceKind {
    /// Rice subsidy, capped at 2,000 by default.
    RiceSubsidy,
    /// Phone allowance, capped at 3,000 by default.
    Phone,
    /// Clothing allowance, capped at 1,500 by default.
    Clothing,
    /// Any other allowance, with a caller-supplied label.
    Other(String),
}

impl AllowanceKind {
    /// The type label for this kind.
    pub fn label(&self) -> &str {
        match self {
            AllowanceKind::RiceSubsidy => RICE_SUBSIDY,
            AllowanceKind::Phone => PHONE_ALLOWANCE,
            AllowanceKind::Clothing => CLOTHING_ALLOWANCE,
            AllowanceKind::Other(label) => label,
        }
    }

    /// The ceiling for this kind under `caps`; `None` for [`AllowanceKind::Other`].
    pub fn cap(&self, caps: &AllowanceCaps) -> Option<Decimal> {
        match self {
            AllowanceKind::RiceSubsidy => Some(caps.rice_subsidy),
            AllowanceKind::Phone => Some(caps.phone),
            AllowanceKind::Clothing => Some(caps.clothing),
            AllowanceKind::Other(_) => None,
        }
    }
}

/// A positive payroll component clamped to a ceiling.
///
/// # Example
///
/// ```
/// use payroll_engine::components::Allowance;
/// use rust_decimal::Decimal;
///
/// let rice = Allowance::rice_subsidy(10001, Decimal::from(2500)).unwrap();
/// assert_eq!(rice.amount(), Decimal::from(2000));
/// assert!(rice.was_capped());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allowance {
    employee_id: EmployeeId,
    kind: AllowanceKind,
    requested_amount: Decimal,
    max_amount: Decimal,
    amount: Decimal,
}

impl Allowance {
    /// Creates an allowance with an explicit ceiling and applies it.
    pub fn with_cap(
        employee_id: i64,
        kind: AllowanceKind,
        amount: Decimal,
        max_amount: Decimal,
    ) -> EngineResult<Self> {
        let employee_id = EmployeeId::new(employee_id)?;
        if let AllowanceKind::Other(label) = &kind {
            if label.trim().is_empty() {
                return Err(EngineError::invalid("type", "Allowance type cannot be empty"));
            }
        }
        if amount < Decimal::ZERO {
            return Err(EngineError::invalid("amount", "Allowance amount cannot be negative"));
        }
        if max_amount < Decimal::ZERO {
            return Err(EngineError::invalid("max_amount", "Allowance ceiling cannot be negative"));
        }
        check_max("amount", amount)?;
        check_max("max_amount", max_amount)?;

        let mut allowance = Self {
            employee_id,
            kind,
            requested_amount: amount,
            max_amount,
            amount,
        };
        allowance.calculate();
        Ok(allowance)
    }

    /// Creates a free-form allowance such as a transport or meal allowance.
    pub fn new(
        employee_id: i64,
        label: impl Into<String>,
        amount: Decimal,
        max_amount: Decimal,
    ) -> EngineResult<Self> {
        Self::with_cap(employee_id, AllowanceKind::Other(label.into()), amount, max_amount)
    }

    /// Creates a standard allowance using the ceilings in `caps`.
    pub fn from_caps(
        employee_id: i64,
        kind: AllowanceKind,
        amount: Decimal,
        caps: &AllowanceCaps,
    ) -> EngineResult<Self> {
        let max_amount = kind.cap(caps).ok_or_else(|| {
            EngineError::invalid("type", format!("'{}' has no configured ceiling", kind.label()))
        })?;
        Self::with_cap(employee_id, kind, amount, max_amount)
    }

    /// Rice subsidy, capped at 2,000.
    pub fn rice_subsidy(employee_id: i64, amount: Decimal) -> EngineResult<Self> {
        Self::from_caps(employee_id, AllowanceKind::RiceSubsidy, amount, &AllowanceCaps::default())
    }

    /// Phone allowance, capped at 3,000.
    pub fn phone_allowance(employee_id: i64, amount: Decimal) -> EngineResult<Self> {
        Self::from_caps(employee_id, AllowanceKind::Phone, amount, &AllowanceCaps::default())
    }

    /// Clothing allowance, capped at 1,500.
    pub fn clothing_allowance(employee_id: i64, amount: Decimal) -> EngineResult<Self> {
        Self::from_caps(employee_id, AllowanceKind::Clothing, amount, &AllowanceCaps::default())
    }

    /// Clamps the amount to the ceiling. Never raises the amount.
    pub fn calculate(&mut self) {
        self.amount = self.requested_amount.min(self.max_amount);
    }

    /// The employee the allowance is paid to.
    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// The kind of allowance.
    pub fn kind(&self) -> &AllowanceKind {
        &self.kind
    }

    /// The type label.
    pub fn component_type(&self) -> &str {
        self.kind.label()
    }

    /// The amount asked for before capping.
    pub fn requested_amount(&self) -> Decimal {
        self.requested_amount
    }

    /// The ceiling.
    pub fn max_amount(&self) -> Decimal {
        self.max_amount
    }

    /// The effective (capped) amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Whether the ceiling reduced the requested amount.
    pub fn was_capped(&self) -> bool {
        self.requested_amount > self.max_amount
    }
}
