//! Catalog product.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// An immutable catalog entry.
///
/// Products are owned by the catalog. The cart copies their fields into a
/// cart line when a product is first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Image reference (a file stem such as `guitarra_01`).
    pub image: String,
    pub description: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_shape() {
        let json = r#"{
            "id": 1,
            "name": "Lukather",
            "image": "guitarra_01",
            "description": "Solid alder body.",
            "price": 299
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.name, "Lukather");
        assert_eq!(product.price, Price::from_units(299));
    }

    #[test]
    fn test_deserialize_rejects_missing_fields() {
        let json = r#"{ "id": 1, "name": "Lukather", "price": 299 }"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}
