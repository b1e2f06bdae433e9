//! Immutable cart snapshots.
//!
//! A [`CartSnapshot`] is the whole cart at one instant: an ordered list of
//! [`CartLine`]s with at most one line per product. Snapshots are never
//! edited in place. Every transform either returns a brand new snapshot or
//! `None` when the request would not change anything, so holders of an old
//! snapshot keep seeing exactly what they saw before.

use std::collections::HashSet;
use std::sync::Arc;

use guitarla_core::{Price, Product, ProductId, Quantity};
use serde::{Deserialize, Serialize, Serializer};

/// A product in the cart together with how many units were picked.
///
/// Serializes as the product's fields plus an integer `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: Quantity,
}

impl CartLine {
    /// A new line holding one unit of `product`.
    #[must_use]
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: Quantity::MIN,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity.get()
    }

    fn with_quantity(&self, quantity: Quantity) -> Self {
        Self {
            product: self.product.clone(),
            quantity,
        }
    }
}

/// Two lines in a persisted cart referred to the same product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("duplicate cart line for product {0}")]
pub struct DuplicateLineError(pub ProductId);

/// The cart contents at one instant.
///
/// Cheaply cloneable via `Arc`. Use [`CartSnapshot::ptr_eq`] to check whether
/// two snapshots are the very same value without comparing lines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<CartLine>")]
pub struct CartSnapshot {
    lines: Arc<[CartLine]>,
}

impl CartSnapshot {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lines: Arc::from(Vec::new()),
        }
    }

    /// Build a snapshot from lines, checking that product ids are unique.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateLineError`] naming the first repeated product id.
    pub fn from_lines(lines: Vec<CartLine>) -> Result<Self, DuplicateLineError> {
        let mut seen = HashSet::with_capacity(lines.len());
        if let Some(dup) = lines.iter().find(|line| !seen.insert(line.id())) {
            return Err(DuplicateLineError(dup.id()));
        }
        Ok(Self::from_unique(lines))
    }

    fn from_unique(lines: Vec<CartLine>) -> Self {
        Self {
            lines: lines.into(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// The line for `id`, if the product is in the cart.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantity times price over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity.get()).sum()
    }

    /// Whether `self` and `other` share the same underlying allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.lines, &other.lines)
    }

    /// Add one unit of `product`.
    ///
    /// Appends a new line if the product is not in the cart yet. Returns
    /// `None` if the existing line is already at the maximum quantity.
    #[must_use]
    pub fn with_added(&self, product: &Product) -> Option<Self> {
        if self.contains(product.id) {
            return self.with_increased(product.id);
        }

        let mut lines = self.lines.to_vec();
        lines.push(CartLine::new(product.clone()));
        Some(Self::from_unique(lines))
    }

    /// Drop the line for `id`. Returns `None` if there is no such line.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }

        let lines = self
            .lines
            .iter()
            .filter(|line| line.id() != id)
            .cloned()
            .collect();
        Some(Self::from_unique(lines))
    }

    /// One more unit of `id`. Returns `None` at the cap or if `id` is absent.
    #[must_use]
    pub fn with_increased(&self, id: ProductId) -> Option<Self> {
        self.with_stepped(id, Quantity::increment)
    }

    /// One fewer unit of `id`. Returns `None` at the floor or if `id` is absent.
    #[must_use]
    pub fn with_decreased(&self, id: ProductId) -> Option<Self> {
        self.with_stepped(id, Quantity::decrement)
    }

    fn with_stepped(&self, id: ProductId, step: fn(Quantity) -> Option<Quantity>) -> Option<Self> {
        let quantity = step(self.get(id)?.quantity)?;

        let lines = self
            .lines
            .iter()
            .map(|line| {
                if line.id() == id {
                    line.with_quantity(quantity)
                } else {
                    line.clone()
                }
            })
            .collect();
        Some(Self::from_unique(lines))
    }
}

impl Default for CartSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<CartLine>> for CartSnapshot {
    type Error = DuplicateLineError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        Self::from_lines(lines)
    }
}

impl Serialize for CartSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.lines.iter())
    }
}

impl<'a> IntoIterator for &'a CartSnapshot {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn guitar(id: i32, price: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Guitar {id}"),
            price: Price::from_units(price),
            image: format!("guitarra_{id:02}"),
            description: "Test guitar".to_string(),
        }
    }

    fn quantity_of(snapshot: &CartSnapshot, id: i32) -> u32 {
        snapshot.get(ProductId::new(id)).unwrap().quantity.get()
    }

    #[test]
    fn test_empty_snapshot() {
        let cart = CartSnapshot::empty();
        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_with_added_appends_new_line() {
        let cart = CartSnapshot::empty()
            .with_added(&guitar(1, 100))
            .unwrap()
            .with_added(&guitar(2, 50))
            .unwrap();

        let ids: Vec<i32> = cart.iter().map(|l| l.id().as_i32()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(quantity_of(&cart, 1), 1);
        assert_eq!(cart.total(), Price::from_units(150));
    }

    #[test]
    fn test_with_added_increments_existing_line() {
        let product = guitar(1, 100);
        let cart = CartSnapshot::empty()
            .with_added(&product)
            .unwrap()
            .with_added(&product)
            .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(quantity_of(&cart, 1), 2);
    }

    #[test]
    fn test_with_added_at_max_is_none() {
        let product = guitar(1, 100);
        let mut cart = CartSnapshot::empty();
        for _ in 0..5 {
            cart = cart.with_added(&product).unwrap();
        }

        assert!(cart.with_added(&product).is_none());
        assert_eq!(quantity_of(&cart, 1), 5);
    }

    #[test]
    fn test_transforms_leave_original_untouched() {
        let before = CartSnapshot::empty().with_added(&guitar(1, 100)).unwrap();
        let after = before.with_increased(ProductId::new(1)).unwrap();

        assert_eq!(quantity_of(&before, 1), 1);
        assert_eq!(quantity_of(&after, 1), 2);
        assert!(!before.ptr_eq(&after));
    }

    #[test]
    fn test_without() {
        let cart = CartSnapshot::empty()
            .with_added(&guitar(1, 100))
            .unwrap()
            .with_added(&guitar(2, 100))
            .unwrap();

        let cart = cart.without(ProductId::new(1)).unwrap();
        assert_eq!(cart.len(), 1);
        assert!(cart.contains(ProductId::new(2)));
        assert!(cart.without(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_with_decreased_stops_at_one() {
        let product = guitar(1, 100);
        let cart = CartSnapshot::empty()
            .with_added(&product)
            .unwrap()
            .with_added(&product)
            .unwrap();

        let cart = cart.with_decreased(product.id).unwrap();
        assert_eq!(quantity_of(&cart, 1), 1);
        assert!(cart.with_decreased(product.id).is_none());
    }

    #[test]
    fn test_steps_on_absent_id_are_none() {
        let cart = CartSnapshot::empty().with_added(&guitar(1, 100)).unwrap();
        assert!(cart.with_increased(ProductId::new(9)).is_none());
        assert!(cart.with_decreased(ProductId::new(9)).is_none());
    }

    #[test]
    fn test_step_leaves_other_lines_alone() {
        let cart = CartSnapshot::empty()
            .with_added(&guitar(1, 100))
            .unwrap()
            .with_added(&guitar(2, 100))
            .unwrap()
            .with_increased(ProductId::new(2))
            .unwrap();

        assert_eq!(quantity_of(&cart, 1), 1);
        assert_eq!(quantity_of(&cart, 2), 2);
    }

    #[test]
    fn test_from_lines_rejects_duplicates() {
        let lines = vec![CartLine::new(guitar(1, 10)), CartLine::new(guitar(1, 10))];
        assert_eq!(
            CartSnapshot::from_lines(lines),
            Err(DuplicateLineError(ProductId::new(1)))
        );
    }

    #[test]
    fn test_line_total_and_item_count() {
        let cart = CartSnapshot::empty()
            .with_added(&guitar(1, 299))
            .unwrap()
            .with_increased(ProductId::new(1))
            .unwrap()
            .with_added(&guitar(2, 349))
            .unwrap();

        assert_eq!(
            cart.get(ProductId::new(1)).unwrap().line_total(),
            Price::from_units(598)
        );
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Price::from_units(947));
    }

    #[test]
    fn test_serializes_as_flat_array() {
        let cart = CartSnapshot::empty().with_added(&guitar(1, 100)).unwrap();
        let value = serde_json::to_value(&cart).unwrap();

        assert_eq!(
            value,
            serde_json::json!([{
                "id": 1,
                "name": "Guitar 1",
                "price": 100,
                "image": "guitarra_01",
                "description": "Test guitar",
                "quantity": 1
            }])
        );
    }
}
