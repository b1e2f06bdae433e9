//! Read-only product catalog.
//!
//! The catalog is loaded once and handed to the [`CartStore`](crate::CartStore),
//! which exposes it to consumers unchanged. Products keep their file order.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use guitarla_core::{Product, ProductId};

/// Guitar catalog bundled with the crate.
const BUILTIN_CATALOG_JSON: &str = include_str!("../data/catalog.json");

static BUILTIN_CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_json(BUILTIN_CATALOG_JSON).expect("Invalid built-in catalog")
});

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),
}

/// Ordered, immutable list of products.
///
/// Cheaply cloneable via `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        if let Some(dup) = products.iter().find(|p| !seen.insert(p.id)) {
            return Err(CatalogError::DuplicateId(dup.id));
        }

        Ok(Self {
            products: products.into(),
        })
    }

    /// The guitar catalog shipped with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_CATALOG.clone()
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or contains duplicate ids.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid catalog.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = ?path, products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            products: Arc::from(Vec::new()),
        }
    }
}
