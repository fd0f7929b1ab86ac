//! Key-value store interface with automatic serialization.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::StoreError;

/// A byte-oriented key-value store with an explicit lifecycle.
///
/// Every operation is atomic from the caller's point of view: a failed
/// `set` leaves the previous value in place.
pub trait KvStore: Send + Sync {
    /// Get the raw bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// List all keys, sorted.
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// Close the store. Later operations fail with [`StoreError::Closed`].
    fn close(&self) -> Result<(), StoreError>;

    /// Whether [`KvStore::close`] has been called.
    fn is_closed(&self) -> bool;
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        (**self).exists(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }

    fn close(&self) -> Result<(), StoreError> {
        (**self).close()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

/// Type-safe wrapper over a [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct JsonStore<S> {
    store: S,
}

impl<S: KvStore> JsonStore<S> {
    /// Wrap a raw store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let records: Option<Vec<ProductRecord>> = store.get("menProducts")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` and store it under `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)?;
        tracing::debug!(key, bytes = bytes.len(), "stored value");
        Ok(())
    }

    /// Delete a value from the store.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.store.delete(key)?;
        tracing::debug!(key, "deleted value");
        Ok(())
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.store.exists(key)
    }

    /// Get all keys in the store.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.store.keys()
    }

    /// Close the underlying store.
    pub fn close(&self) -> Result<(), StoreError> {
        self.store.close()
    }

    /// Access the raw store.
    pub fn inner(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        name: String,
        price: f64,
    }

    #[test]
    fn test_typed_get_missing() {
        let store = JsonStore::new(MemoryStore::new());
        let value: Option<Item> = store.get("nothing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_typed_set_and_get() {
        let store = JsonStore::new(MemoryStore::new());
        let items = vec![Item {
            name: "Rose Serum".to_string(),
            price: 32.5,
        }];
        store.set("skincareProducts", &items).unwrap();

        let loaded: Vec<Item> = store.get("skincareProducts").unwrap().unwrap();
        assert_eq!(loaded, items);
        assert!(store.exists("skincareProducts").unwrap());
    }

    #[test]
    fn test_corrupt_value_is_serialization_error() {
        let store = JsonStore::new(MemoryStore::new());
        store.inner().set("broken", b"not json").unwrap();

        let result: Result<Option<Item>, _> = store.get("broken");
        assert!(matches!(result, Err(StoreError::Serialize(_))));
    }

    #[test]
    fn test_shared_store_through_arc() {
        let raw = Arc::new(MemoryStore::new());
        let store = JsonStore::new(Arc::clone(&raw));
        store.set("isAdmin", &true).unwrap();

        assert!(raw.exists("isAdmin").unwrap());
    }
}
