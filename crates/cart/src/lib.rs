//! GuitarLA Cart - Cart state store with key-value persistence.
//!
//! The [`CartStore`] owns the shopping cart for a single browsing session. It
//! clamps quantities to `1..=5`, derives totals from the current snapshot, and
//! writes the full cart to a [`KeyValueStore`] after every operation so it
//! survives restarts.
//!
//! # Architecture
//!
//! - [`catalog`] - Read-only product listing handed to the store
//! - [`snapshot`] - Immutable cart snapshots and their pure transforms
//! - [`persistence`] - JSON encoding of snapshots and the load/save protocol
//! - [`storage`] - Key-value backends (in-memory and file-based)
//! - [`store`] - The stateful handle consumers interact with
//! - [`config`] - Environment-driven configuration for binaries
//!
//! # Failure model
//!
//! The store never surfaces errors from its operations. Malformed persisted
//! data starts an empty cart, failed writes are logged and ignored, and
//! out-of-range quantity changes are no-ops.
//!
//! # Example
//!
//! ```rust
//! use guitarla_cart::{CartStore, Catalog, MemoryStorage};
//!
//! let catalog = Catalog::builtin();
//! let mut store = CartStore::open(catalog.clone(), MemoryStorage::new());
//!
//! let guitar = &catalog.products()[0];
//! store.add_to_cart(guitar);
//! store.increase_quantity(guitar.id);
//!
//! assert_eq!(store.cart().len(), 1);
//! assert_eq!(store.total(), guitar.price * 2);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod persistence;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use catalog::{Catalog, CatalogError};
pub use config::{CartConfig, ConfigError};
pub use persistence::{DEFAULT_STORAGE_KEY, PersistenceError};
pub use snapshot::{CartLine, CartSnapshot, DuplicateLineError};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};
pub use store::{CartStore, SubscriptionId};

pub use guitarla_core::{MAX_QUANTITY, MIN_QUANTITY, Price, Product, ProductId, Quantity};
