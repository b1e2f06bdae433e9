//! The cart store.
//!
//! [`CartStore`] is the single handle a front end holds: it exposes the
//! catalog, the current [`CartSnapshot`], the cart operations, and the derived
//! totals. Every operation swaps in a new snapshot (or keeps the current one
//! when nothing changes), writes the cart to storage, and then notifies
//! subscribers.

use std::fmt;

use guitarla_core::{Price, Product, ProductId};
use tracing::instrument;

use crate::catalog::Catalog;
use crate::persistence::{self, DEFAULT_STORAGE_KEY};
use crate::snapshot::{CartLine, CartSnapshot};
use crate::storage::KeyValueStore;

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartSnapshot)>;

/// Owner of the cart state for one session.
pub struct CartStore<S: KeyValueStore> {
    catalog: Catalog,
    storage: S,
    key: String,
    cart: CartSnapshot,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open a store over `storage` using the default `"cart"` key.
    ///
    /// Restores the previously persisted cart if there is a readable one,
    /// otherwise starts empty.
    pub fn open(catalog: Catalog, storage: S) -> Self {
        Self::with_key(catalog, storage, DEFAULT_STORAGE_KEY)
    }

    /// Open a store that persists under a custom key.
    pub fn with_key(catalog: Catalog, storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = persistence::load(&storage, &key);
        tracing::info!(
            key = %key,
            lines = cart.len(),
            products = catalog.len(),
            "Opened cart store"
        );

        Self {
            catalog,
            storage,
            key,
            cart,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current cart snapshot.
    #[must_use]
    pub const fn cart(&self) -> &CartSnapshot {
        &self.cart
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.cart.get(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Sum of quantity times price over the current cart.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and hand back its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Add one unit of `product`, appending a new line if needed.
    ///
    /// No-op when the line is already at the maximum quantity.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product) {
        let next = self.cart.with_added(product);
        self.commit(next);
    }

    /// Add one unit of the catalog product `id`.
    ///
    /// Returns `false` without touching the cart or storage if the catalog has
    /// no such product.
    #[instrument(skip(self))]
    pub fn add_by_id(&mut self, id: ProductId) -> bool {
        let Some(product) = self.catalog.find(id).cloned() else {
            tracing::debug!("Product not in catalog");
            return false;
        };
        self.add_to_cart(&product);
        true
    }

    /// Remove the line for `id`. No-op if absent.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: ProductId) {
        let next = self.cart.without(id);
        self.commit(next);
    }

    /// One more unit of `id`, up to the maximum. No-op if absent.
    #[instrument(skip(self))]
    pub fn increase_quantity(&mut self, id: ProductId) {
        let next = self.cart.with_increased(id);
        self.commit(next);
    }

    /// One fewer unit of `id`, never below the minimum. No-op if absent.
    #[instrument(skip(self))]
    pub fn decrease_quantity(&mut self, id: ProductId) {
        let next = self.cart.with_decreased(id);
        self.commit(next);
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        let next = (!self.cart.is_empty()).then(CartSnapshot::empty);
        self.commit(next);
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register `listener` to be called with every new snapshot.
    ///
    /// Listeners run after the new snapshot has been persisted, in
    /// registration order. Operations that leave the cart unchanged do not
    /// notify.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Install `next` (if any), persist, and notify.
    fn commit(&mut self, next: Option<CartSnapshot>) {
        let changed = next.is_some();
        if let Some(next) = next {
            self.cart = next;
            tracing::debug!(
                lines = self.cart.len(),
                items = self.cart.item_count(),
                "Cart updated"
            );
        } else {
            tracing::debug!("Cart unchanged");
        }

        self.persist();

        if changed {
            for (_, listener) in &mut self.listeners {
                listener(&self.cart);
            }
        }
    }

    /// Write the current snapshot to storage. Failures are logged only.
    fn persist(&mut self) {
        if let Err(e) = persistence::save(&mut self.storage, &self.key, &self.cart) {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }
}

impl<S: KeyValueStore + fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("cart", &self.cart)
            .field("catalog_len", &self.catalog.len())
            .field("storage", &self.storage)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
