//! Integration tests for GuitarLA.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p guitarla-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end cart operation scenarios
//! - `cart_properties` - Property tests over random operation sequences
//! - `cart_persistence` - Restarting stores over memory and file storage
//!
//! This library holds the fixtures shared by the test files.

use std::path::PathBuf;

use guitarla_cart::Catalog;
use guitarla_core::{Price, Product, ProductId};

/// A test product with the given id and whole-unit price.
#[must_use]
pub fn guitar(id: i32, price: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Guitar {id}"),
        price: Price::from_units(price),
        image: format!("guitarra_{id:02}"),
        description: format!("Test guitar number {id}"),
    }
}

/// A small catalog of products priced 100, 200, 300, ...
///
/// # Panics
///
/// Never: the generated ids are unique.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_catalog(size: u32) -> Catalog {
    let products = (1..=size)
        .map(|n| guitar(i32::try_from(n).expect("catalog size fits in i32"), n * 100))
        .collect();
    Catalog::new(products).expect("generated ids are unique")
}

/// A fresh directory path under the system temp dir. Not created.
#[must_use]
pub fn temp_storage_dir() -> PathBuf {
    std::env::temp_dir().join(format!("guitarla-it-{}", uuid::Uuid::new_v4()))
}
