//! Cart commands.
//!
//! Each command opens the file-backed store (restoring the persisted cart),
//! applies one operation, and prints the resulting cart.

use std::io::Write;

use guitarla_cart::{CartConfig, CartStore, FileStorage};
use guitarla_core::ProductId;
use thiserror::Error;
use tracing::info;

use crate::view::CartView;

/// Errors specific to cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    #[error("Product {0} is not in the catalog")]
    UnknownProduct(ProductId),
}

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Open the store described by `config`.
fn open_store(config: &CartConfig) -> Result<CartStore<FileStorage>, Box<dyn std::error::Error>> {
    let catalog = config.catalog()?;
    Ok(CartStore::with_key(
        catalog,
        config.storage(),
        config.storage_key.clone(),
    ))
}

fn print_cart(store: &CartStore<FileStorage>, out: &mut impl Write) -> CommandResult {
    let view = CartView::from(store.cart());
    out.write_all(view.render().as_bytes())?;
    Ok(())
}

/// Print the cart.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub fn show(config: &CartConfig, out: &mut impl Write) -> CommandResult {
    let store = open_store(config)?;
    print_cart(&store, out)
}

/// Add one unit of catalog product `id`.
///
/// # Errors
///
/// Returns [`CartCommandError::UnknownProduct`] if `id` is not in the catalog.
pub fn add(config: &CartConfig, id: ProductId, out: &mut impl Write) -> CommandResult {
    let mut store = open_store(config)?;
    if !store.add_by_id(id) {
        return Err(CartCommandError::UnknownProduct(id).into());
    }
    info!(product_id = %id, "Added to cart");
    print_cart(&store, out)
}

/// Remove the line for `id`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub fn remove(config: &CartConfig, id: ProductId, out: &mut impl Write) -> CommandResult {
    let mut store = open_store(config)?;
    store.remove_from_cart(id);
    info!(product_id = %id, "Removed from cart");
    print_cart(&store, out)
}

/// Increase the quantity of `id` by one.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub fn increase(config: &CartConfig, id: ProductId, out: &mut impl Write) -> CommandResult {
    let mut store = open_store(config)?;
    store.increase_quantity(id);
    print_cart(&store, out)
}

/// Decrease the quantity of `id` by one.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub fn decrease(config: &CartConfig, id: ProductId, out: &mut impl Write) -> CommandResult {
    let mut store = open_store(config)?;
    store.decrease_quantity(id);
    print_cart(&store, out)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub fn clear(config: &CartConfig, out: &mut impl Write) -> CommandResult {
    let mut store = open_store(config)?;
    store.clear_cart();
    info!("Cleared cart");
    print_cart(&store, out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> CartConfig {
        CartConfig {
            storage_dir: std::env::temp_dir().join(format!("guitarla-cli-{}", uuid::Uuid::new_v4())),
            ..CartConfig::default()
        }
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> CommandResult) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_then_show_across_invocations() {
        let config = config();

        let added = output(|out| add(&config, ProductId::new(1), out));
        assert!(added.contains("Lukather"));
        assert!(added.contains("Total: $299.00"));

        let shown = output(|out| show(&config, out));
        assert_eq!(added, shown);

        std::fs::remove_dir_all(&config.storage_dir).unwrap();
    }

    #[test]
    fn test_add_unknown_product_fails() {
        let config = config();
        let mut out = Vec::new();
        let err = add(&config, ProductId::new(999), &mut out).unwrap_err();
        assert_eq!(err.to_string(), "Product 999 is not in the catalog");
        assert!(out.is_empty());
    }
}
