//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as [`Decimal`] so that cart totals never accumulate
//! floating point error. On the wire they are plain JSON numbers (`299`,
//! `349.5`), which keeps persisted carts readable by any JSON consumer.
//!
//! Whole amounts that fit an `i64` are written exactly. Anything else goes
//! through `f64`, so digits beyond `f64` precision (about 15 significant
//! digits) are lost when a cart is saved and reloaded.
//!
//! Arithmetic saturates at [`Price::MAX`] instead of overflowing, so a huge
//! price read from storage or a catalog file cannot bring down a total.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors that can occur when constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// Catalog prices are never negative.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative price in the store's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest representable price. Sums and products clamp here.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole-unit amount (e.g. `299` dollars).
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("${:.2}", self.0))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(rhs)))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole amounts go out as integers so `299` stays `299`, not `299.0`.
        match self.0.to_i64() {
            Some(units) if self.0.fract().is_zero() => serializer.serialize_i64(units),
            _ => rust_decimal::serde::float::serialize(&self.0, serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 0)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_units(299).to_string(), "$299.00");
        assert_eq!(Price::from_cents(1999).to_string(), "$19.99");
        assert_eq!(format!("{:>8}", Price::from_units(5)), "   $5.00");
    }

    #[test]
    fn test_arithmetic() {
        let price = Price::from_units(100);
        assert_eq!(price * 3, Price::from_units(300));
        assert_eq!(price + Price::from_cents(50), Price::from_cents(10_050));

        let total: Price = [Price::from_units(1), Price::from_units(2)].into_iter().sum();
        assert_eq!(total, Price::from_units(3));
    }

    #[test]
    fn test_arithmetic_saturates_at_max() {
        let amount = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        let huge = Price::new(amount).unwrap();
        assert_eq!(huge * 2, Price::MAX);
        assert_eq!(Price::MAX + Price::from_units(1), Price::MAX);

        let total: Price = [huge, huge, Price::from_units(10)].into_iter().sum();
        assert_eq!(total, Price::MAX);
    }

    #[test]
    fn test_serializes_whole_amounts_as_integers() {
        assert_eq!(serde_json::to_string(&Price::from_units(299)).unwrap(), "299");
    }

    #[test]
    fn test_serializes_fractional_amounts_as_numbers() {
        assert_eq!(
            serde_json::to_string(&Price::from_cents(34_950)).unwrap(),
            "349.5"
        );
    }

    #[test]
    fn test_deserialize_accepts_numbers() {
        let price: Price = serde_json::from_str("299").unwrap();
        assert_eq!(price, Price::from_units(299));

        let price: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(price, Price::from_cents(1999));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-5").is_err());
    }
}
