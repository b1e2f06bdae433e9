//! Core types for GuitarLA.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use id::*;
pub use price::{Price, PriceError};
pub use product::Product;
pub use quantity::{MAX_QUANTITY, MIN_QUANTITY, Quantity, QuantityError};
