//! Plain-text rendering of the catalog and cart.

use std::fmt;

use guitarla_cart::{CartLine, CartSnapshot, Catalog};

/// Cart item display data.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub at_max: bool,
}

/// Cart display data.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id().to_string(),
            name: line.product.name.clone(),
            quantity: line.quantity.get(),
            price: line.product.price.to_string(),
            line_price: line.line_total().to_string(),
            at_max: line.quantity.is_max(),
        }
    }
}

impl From<&CartSnapshot> for CartView {
    fn from(cart: &CartSnapshot) -> Self {
        Self {
            items: cart.iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

impl CartView {
    /// Render the cart as a table followed by the total.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return writeln!(f, "Cart is empty");
        }

        writeln!(
            f,
            "{:>4}  {:<12} {:>10} {:>4} {:>10}",
            "ID", "Guitar", "Price", "Qty", "Subtotal"
        )?;
        for item in &self.items {
            writeln!(
                f,
                "{:>4}  {:<12} {:>10} {:>4} {:>10}{}",
                item.id,
                item.name,
                item.price,
                item.quantity,
                item.line_price,
                if item.at_max { "  (max)" } else { "" }
            )?;
        }
        writeln!(f, "Items: {}", self.item_count)?;
        writeln!(f, "Total: {}", self.total)
    }
}

/// Render the catalog as a table.
#[must_use]
pub fn render_catalog(catalog: &Catalog) -> String {
    catalog
        .iter()
        .map(|product| {
            format!(
                "{:>4}  {:<12} {:>10}  {}\n",
                product.id.to_string(),
                product.name,
                product.price,
                product.description
            )
        })
        .collect()
}
