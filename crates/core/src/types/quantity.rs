//! Bounded cart quantity.
//!
//! A [`Quantity`] is always within `MIN_QUANTITY..=MAX_QUANTITY`. Stepping past
//! either bound leaves the value unchanged, which is how the cart turns
//! "increase at max" and "decrease at min" into silent no-ops.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest quantity a cart line can hold.
pub const MIN_QUANTITY: u32 = 1;

/// Largest quantity a cart line can hold.
pub const MAX_QUANTITY: u32 = 5;

/// Errors that can occur when constructing a [`Quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity {0} is out of range ({min}..={max})", min = MIN_QUANTITY, max = MAX_QUANTITY)]
    OutOfRange(u32),
}

/// Number of units of a product in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The quantity of a freshly added line.
    pub const MIN: Self = Self(MIN_QUANTITY);

    /// The cap for a single line.
    pub const MAX: Self = Self(MAX_QUANTITY);

    /// Create a quantity, validating bounds.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::OutOfRange`] if `value` is outside
    /// `MIN_QUANTITY..=MAX_QUANTITY`.
    pub const fn new(value: u32) -> Result<Self, QuantityError> {
        if value < MIN_QUANTITY || value > MAX_QUANTITY {
            return Err(QuantityError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// One more, or `None` if already at the cap.
    #[must_use]
    pub const fn increment(self) -> Option<Self> {
        if self.0 < MAX_QUANTITY {
            Some(Self(self.0 + 1))
        } else {
            None
        }
    }

    /// One fewer, or `None` if already at the floor.
    #[must_use]
    pub const fn decrement(self) -> Option<Self> {
        if self.0 > MIN_QUANTITY {
            Some(Self(self.0 - 1))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_max(self) -> bool {
        self.0 == MAX_QUANTITY
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}
