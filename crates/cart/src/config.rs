//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GUITARLA_STORAGE_DIR` - Directory for the file-backed cart (default: `.guitarla`)
//! - `GUITARLA_STORAGE_KEY` - Key the cart is stored under (default: `cart`)
//! - `GUITARLA_CATALOG` - Path to a catalog JSON file (default: built-in catalog)

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::persistence::DEFAULT_STORAGE_KEY;
use crate::storage::{FileStorage, validate_key};

const DEFAULT_STORAGE_DIR: &str = ".guitarla";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory holding the persisted cart file
    pub storage_dir: PathBuf,
    /// Key the cart is stored under
    pub storage_key: String,
    /// Catalog file; `None` uses the built-in catalog
    pub catalog_path: Option<PathBuf>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            catalog_path: None,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `GUITARLA_STORAGE_KEY` is not a valid storage key.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_key =
            lookup("GUITARLA_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        validate_storage_key(&storage_key, "GUITARLA_STORAGE_KEY")?;

        Ok(Self {
            storage_dir: lookup("GUITARLA_STORAGE_DIR")
                .filter(|dir| !dir.is_empty())
                .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from),
            storage_key,
            catalog_path: lookup("GUITARLA_CATALOG")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        })
    }

    /// File storage rooted at the configured directory.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.storage_dir)
    }

    /// Load the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a catalog file is configured and cannot be loaded.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        self.catalog_path
            .as_deref()
            .map_or_else(|| Ok(Catalog::builtin()), Catalog::load)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Validate that a storage key can be used as a file name.
fn validate_storage_key(key: &str, var_name: &str) -> Result<(), ConfigError> {
    validate_key(key).map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))
}
