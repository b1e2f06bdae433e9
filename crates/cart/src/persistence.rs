//! Cart persistence protocol.
//!
//! The full cart is stored as a JSON array under a single key, overwriting the
//! previous value on every save. Each element carries every product field plus
//! an integer `quantity`:
//!
//! ```json
//! [{"id":1,"name":"Lukather","price":299,"image":"guitarra_01","description":"...","quantity":2}]
//! ```
//!
//! There is no schema version. A stored value that does not decode into a
//! valid cart (bad JSON, missing fields, quantity outside `1..=5`, repeated
//! product ids) is treated as if nothing had been stored.

use thiserror::Error;

use crate::snapshot::CartSnapshot;
use crate::storage::{KeyValueStore, StorageError};

/// Key the cart is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Errors from loading or saving a cart snapshot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Malformed cart snapshot: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Serialize a snapshot to its stored JSON form.
///
/// # Errors
///
/// Returns [`PersistenceError::Encode`] if serialization fails.
pub fn encode(snapshot: &CartSnapshot) -> Result<String, PersistenceError> {
    serde_json::to_string(snapshot).map_err(PersistenceError::Encode)
}

/// Parse a stored JSON value back into a snapshot.
///
/// # Errors
///
/// Returns [`PersistenceError::Decode`] if the value is not a valid cart.
pub fn decode(raw: &str) -> Result<CartSnapshot, PersistenceError> {
    serde_json::from_str(raw).map_err(PersistenceError::Decode)
}

/// Read the snapshot stored under `key`.
///
/// Returns `Ok(None)` when nothing is stored.
///
/// # Errors
///
/// Returns an error if the backend cannot be read or the value is malformed.
pub fn try_load<S>(storage: &S, key: &str) -> Result<Option<CartSnapshot>, PersistenceError>
where
    S: KeyValueStore + ?Sized,
{
    storage.get(key)?.map(|raw| decode(&raw)).transpose()
}

/// Read the snapshot stored under `key`, falling back to an empty cart.
///
/// Never fails: read errors and malformed values are logged and yield an
/// empty snapshot.
pub fn load<S>(storage: &S, key: &str) -> CartSnapshot
where
    S: KeyValueStore + ?Sized,
{
    match try_load(storage, key) {
        Ok(Some(snapshot)) => {
            tracing::debug!(key, lines = snapshot.len(), "Restored persisted cart");
            snapshot
        }
        Ok(None) => {
            tracing::debug!(key, "No persisted cart, starting empty");
            CartSnapshot::empty()
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable persisted cart");
            CartSnapshot::empty()
        }
    }
}

/// Write `snapshot` under `key`, replacing the previous value.
///
/// # Errors
///
/// Returns an error if encoding or the backend write fails.
pub fn save<S>(storage: &mut S, key: &str, snapshot: &CartSnapshot) -> Result<(), PersistenceError>
where
    S: KeyValueStore + ?Sized,
{
    let raw = encode(snapshot)?;
    storage.set(key, &raw)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use guitarla_core::{Price, Product, ProductId};

    fn guitar(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Guitar {id}"),
            price: Price::from_units(100),
            image: format!("guitarra_{id:02}"),
            description: String::new(),
        }
    }

    fn sample_cart() -> CartSnapshot {
        CartSnapshot::empty()
            .with_added(&guitar(2))
            .unwrap()
            .with_added(&guitar(1))
            .unwrap()
            .with_increased(ProductId::new(1))
            .unwrap()
    }

    #[test]
    fn test_save_then_load_preserves_lines_and_order() {
        let mut storage = MemoryStorage::new();
        let cart = sample_cart();

        save(&mut storage, DEFAULT_STORAGE_KEY, &cart).unwrap();
        let restored = load(&storage, DEFAULT_STORAGE_KEY);

        assert_eq!(restored, cart);
        let ids: Vec<i32> = restored.iter().map(|l| l.id().as_i32()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_load_absent_is_empty() {
        let storage = MemoryStorage::new();
        assert!(load(&storage, DEFAULT_STORAGE_KEY).is_empty());
        assert!(try_load(&storage, DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_load_malformed_json_is_empty() {
        let storage = MemoryStorage::with_entry(DEFAULT_STORAGE_KEY, "{not json");
        assert!(load(&storage, DEFAULT_STORAGE_KEY).is_empty());
        assert!(matches!(
            try_load(&storage, DEFAULT_STORAGE_KEY),
            Err(PersistenceError::Decode(_))
        ));
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let storage = MemoryStorage::with_entry(DEFAULT_STORAGE_KEY, r#"{"id":1}"#);
        assert!(load(&storage, DEFAULT_STORAGE_KEY).is_empty());
    }

    #[test]
    fn test_decode_rejects_out_of_range_quantity() {
        let raw = r#"[{"id":1,"name":"A","price":10,"image":"a","description":"","quantity":6}]"#;
        assert!(matches!(decode(raw), Err(PersistenceError::Decode(_))));

        let raw = r#"[{"id":1,"name":"A","price":10,"image":"a","description":"","quantity":0}]"#;
        assert!(matches!(decode(raw), Err(PersistenceError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let raw = r#"[
            {"id":1,"name":"A","price":10,"image":"a","description":"","quantity":1},
            {"id":1,"name":"A","price":10,"image":"a","description":"","quantity":2}
        ]"#;
        assert!(matches!(decode(raw), Err(PersistenceError::Decode(_))));
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode("[]").unwrap().is_empty());
    }

    #[test]
    fn test_encode_is_a_json_array_of_lines() {
        let raw = encode(&sample_cart()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        let lines = value.as_array().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["id"], 1);
        assert_eq!(lines[1]["quantity"], 2);
        assert_eq!(lines[1]["price"], 100);
    }

    #[test]
    fn test_save_overwrites() {
        let mut storage = MemoryStorage::new();
        save(&mut storage, DEFAULT_STORAGE_KEY, &sample_cart()).unwrap();
        save(&mut storage, DEFAULT_STORAGE_KEY, &CartSnapshot::empty()).unwrap();

        assert_eq!(storage.raw(DEFAULT_STORAGE_KEY), Some("[]"));
    }
}
