//! Type-safe monetary value with embedded currency.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::DomainError;

/// Currencies the gateway is asked to charge in.
///
/// Orders are always created in INR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    INR,
}

impl Currency {
    /// Number of minor units in one major unit (paise per rupee).
    pub fn minor_per_major(&self) -> i64 {
        match self {
            Currency::INR => 100,
        }
    }

    /// Returns the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "₹",
        }
    }

    /// ISO 4217 code as sent to the gateway.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Type-safe money representation with embedded currency.
///
/// Amount is stored in the smallest unit of the currency (paise)
/// to avoid floating-point precision issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: i64,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value from minor units.
    pub fn new(amount: i64, currency: Currency) -> Result<Self, DomainError> {
        if amount <= 0 {
            return Err(DomainError::NonPositiveAmount);
        }
        Ok(Self { amount, currency })
    }

    /// Converts an amount in major units (rupees) into minor units.
    ///
    /// The conversion goes through a decimal so `19.99` becomes `1999` paise.
    /// Fractions of a paisa are truncated toward zero.
    pub fn from_major(amount: f64, currency: Currency) -> Result<Self, DomainError> {
        if !amount.is_finite() {
            return Err(DomainError::InvalidAmount);
        }
        if amount <= 0.0 {
            return Err(DomainError::NonPositiveAmount);
        }

        let major = Decimal::from_f64(amount).ok_or(DomainError::InvalidAmount)?;
        let minor = major
            .checked_mul(Decimal::from(currency.minor_per_major()))
            .ok_or(DomainError::InvalidAmount)?
            .trunc()
            .to_i64()
            .ok_or(DomainError::InvalidAmount)?;

        Self::new(minor, currency)
    }

    /// Returns the amount in smallest currency unit.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_major = self.currency.minor_per_major();
        let major = self.amount / per_major;
        let minor = (self.amount % per_major).abs();
        write!(f, "{}{}.{:02}", self.currency.symbol(), major, minor)
    }
}
