//! Integer minor-unit money.
//!
//! All prices and totals are carried as whole USD cents. Major-unit decimals
//! (as the content backend and configuration supply them) are converted once,
//! at the boundary, rounding half away from zero.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("amount must not be negative: {0}")]
    Negative(String),

    #[error("amount is not a finite number")]
    NotFinite,

    #[error("amount out of range: {0}")]
    OutOfRange(String),

    #[error("invalid amount \"{input}\": {reason}")]
    Parse { input: String, reason: String },
}

/// A non-negative amount of money in USD cents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(u64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    #[must_use]
    pub const fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Converts a major-unit amount (dollars) to cents, rounding half away
    /// from zero (`12.345` → `1235`).
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] for amounts below zero and
    /// [`MoneyError::OutOfRange`] if the result does not fit in `u64`.
    pub fn from_major(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount.to_string()));
        }
        let cents = amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| MoneyError::OutOfRange(amount.to_string()))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        cents
            .to_u64()
            .map(Self)
            .ok_or_else(|| MoneyError::OutOfRange(amount.to_string()))
    }

    /// Converts a floating-point dollar amount, as found in loosely typed
    /// JSON feeds, to cents.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::NotFinite`] for NaN or infinities, otherwise the
    /// same errors as [`Cents::from_major`].
    pub fn from_major_f64(amount: f64) -> Result<Self, MoneyError> {
        if !amount.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        let decimal =
            Decimal::try_from(amount).map_err(|_| MoneyError::OutOfRange(amount.to_string()))?;
        Self::from_major(decimal)
    }

    /// The amount in major units (dollars), exact to the cent.
    #[must_use]
    pub fn to_major(self) -> Decimal {
        Decimal::from(self.0) / Decimal::ONE_HUNDRED
    }

    #[must_use]
    pub const fn saturating_add(self, other: Cents) -> Cents {
        Cents(self.0.saturating_add(other.0))
    }

    #[must_use]
    pub const fn saturating_sub(self, other: Cents) -> Cents {
        Cents(self.0.saturating_sub(other.0))
    }

    /// Unit price times quantity, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Cents {
        Cents(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Cents {
    type Err = MoneyError;

    /// Parses a dollar amount such as `"75"`, `"5.99"` or `"$5.99"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let raw = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let amount = Decimal::from_str(raw).map_err(|e| MoneyError::Parse {
            input: s.to_owned(),
            reason: e.to_string(),
        })?;
        Self::from_major(amount)
    }
}

impl std::iter::Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Self {
        iter.fold(Cents::ZERO, Cents::saturating_add)
    }
}
