//! Catalog listing.

use std::io::Write;

use guitarla_cart::CartConfig;

use crate::view::render_catalog;

/// Print every catalog product.
///
/// # Errors
///
/// Returns an error if the configured catalog cannot be loaded or output
/// cannot be written.
pub fn list(config: &CartConfig, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = config.catalog()?;
    tracing::debug!(products = catalog.len(), "Listing catalog");
    out.write_all(render_catalog(&catalog).as_bytes())?;
    Ok(())
}
