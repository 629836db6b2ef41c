//! Money value object stored in minor units.
//!
//! Amounts are kept as integer cents so that discounts and totals are exact.
//! Over the wire an amount is a JSON number with two fractional digits
//! (`12.5` means twelve and a half units of currency).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use super::ValidationError;

/// Non-negative monetary amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates an amount from cents, rejecting negative values.
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        if cents < 0 {
            return Err(ValidationError::invalid_format(
                "amount",
                "must not be negative",
            ));
        }
        Ok(Self(cents))
    }

    /// Creates an amount from a decimal value, rounding to the nearest cent.
    pub fn from_decimal(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format("amount", "must be a finite number"));
        }
        let cents = (value * 100.0).round();
        if cents < 0.0 || cents > i64::MAX as f64 {
            return Err(ValidationError::invalid_format(
                "amount",
                "must be between zero and the maximum representable amount",
            ));
        }
        Ok(Self(cents as i64))
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the amount as a decimal value.
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies by a quantity, saturating at the maximum amount.
    pub fn times(&self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Returns `percent`% of this amount, rounded half-up to the cent.
    pub fn percentage(&self, percent: u32) -> Money {
        let scaled = i128::from(self.0) * i128::from(percent);
        let rounded = (scaled + 50) / 100;
        Money(i64::try_from(rounded).unwrap_or(i64::MAX))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    /// Floors at zero; amounts never go negative.
    fn sub(self, rhs: Money) -> Money {
        Money((self.0 - rhs.0).max(0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_decimal(value).map_err(serde::de::Error::custom)
    }
}
