//! GuitarLA Core - Shared domain types.
//!
//! This crate provides the value types used across all GuitarLA components:
//! - `cart` - Cart state store, catalog, and storage backends
//! - `cli` - Command-line front end for browsing the catalog and editing the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, quantities, and products

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
