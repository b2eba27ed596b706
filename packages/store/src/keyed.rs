//! # Keyed store: JSON values over a durable string medium
//!
//! [`StorageBackend`] is the raw collaborator: string values under string keys,
//! the shape of the browser's `localStorage`. [`KeyedStore`] layers JSON
//! encoding on top and owns the namespace lifecycle:
//!
//! | Method | Behaviour |
//! |--------|-----------|
//! | [`get`](KeyedStore::get) | Parse the value under a key. A value that does not parse as `T` is a [`StoreError::Corruption`]. |
//! | [`set`](KeyedStore::set) | Serialise and persist. |
//! | [`ensure`](KeyedStore::ensure) | Write a default only if the key is absent (or corrupt). Existing data is never overwritten. |
//! | [`load`](KeyedStore::load) | Read with recovery: absence and corruption both yield the default, and corruption reinitialises that key. |
//! | [`update`](KeyedStore::update) | Read-modify-write of one namespace key. |
//!
//! Corruption is always scoped to a single key. Recovering one namespace never
//! touches the others.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Durable string-keyed storage medium.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// JSON-valued view over a [`StorageBackend`].
#[derive(Clone, Debug)]
pub struct KeyedStore<S> {
    backend: S,
}

impl<S: StorageBackend> KeyedStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Read and parse the value under `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.backend.get_item(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corruption {
                key: key.to_string(),
                source,
            })
    }

    /// Serialise `value` and persist it under `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.set_item(key, &raw)
    }

    /// Initialise `key` with `default` unless it already holds a valid value.
    ///
    /// Returns `true` when the default was written.
    pub fn ensure<T: Serialize + DeserializeOwned>(
        &self,
        key: &str,
        default: &T,
    ) -> Result<bool, StoreError> {
        match self.get::<T>(key) {
            Ok(Some(_)) => Ok(false),
            Ok(None) => {
                tracing::debug!(key, "initialising namespace");
                self.set(key, default)?;
                Ok(true)
            }
            Err(StoreError::Corruption { source, .. }) => {
                tracing::warn!(key, error = %source, "reinitialising corrupt namespace");
                self.set(key, default)?;
                Ok(true)
            }
            Err(e) => Err(e),
        }
    }

    /// Read `key`, treating absence and corruption as the default value.
    pub fn load<T>(&self, key: &str) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        match self.get::<T>(key) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Ok(T::default()),
            Err(StoreError::Corruption { source, .. }) => {
                tracing::warn!(key, error = %source, "reinitialising corrupt namespace");
                let value = T::default();
                self.set(key, &value)?;
                Ok(value)
            }
            Err(e) => Err(e),
        }
    }

    /// Apply `f` to the value under `key` and write the result back.
    pub fn update<T, R>(&self, key: &str, f: impl FnOnce(&mut T) -> R) -> Result<R, StoreError>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let mut value = self.load::<T>(key)?;
        let out = f(&mut value);
        self.set(key, &value)?;
        Ok(out)
    }

    /// Like [`update`](Self::update), but `f` may reject the change, in which
    /// case nothing is written.
    pub fn try_update<T, R>(
        &self,
        key: &str,
        f: impl FnOnce(&mut T) -> Result<R, StoreError>,
    ) -> Result<R, StoreError>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let mut value = self.load::<T>(key)?;
        let out = f(&mut value)?;
        self.set(key, &value)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::MemoryStore;
    use serde_json::{json, Value};

    type Records = BTreeMap<String, Value>;

    #[test]
    fn test_ensure_does_not_overwrite_existing_data() {
        let store = KeyedStore::new(MemoryStore::new());

        assert!(store.ensure("recipeData", &Records::new()).unwrap());

        let mut records = Records::new();
        records.insert("42".into(), json!({"id": 42, "title": "Soup"}));
        store.set("recipeData", &records).unwrap();

        assert!(!store.ensure("recipeData", &Records::new()).unwrap());
        let loaded: Records = store.get("recipeData").unwrap().unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_get_reports_corruption() {
        let backend = MemoryStore::new();
        backend.set_item("savedLists", "{not json").unwrap();
        let store = KeyedStore::new(backend);

        let err = store.get::<Records>("savedLists").unwrap_err();
        assert!(matches!(err, StoreError::Corruption { ref key, .. } if key == "savedLists"));
    }

    #[test]
    fn test_load_recovers_only_the_corrupt_key() {
        let backend = MemoryStore::new();
        backend.set_item("savedLists", "[1, 2").unwrap();
        backend.set_item("recipeData", r#"{"1": {"id": 1}}"#).unwrap();
        let store = KeyedStore::new(backend.clone());

        let lists: BTreeMap<String, Vec<String>> = store.load("savedLists").unwrap();
        assert!(lists.is_empty());
        assert_eq!(backend.get_item("savedLists").unwrap().as_deref(), Some("{}"));

        let records: Records = store.load("recipeData").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_wrong_shape_counts_as_corruption() {
        let backend = MemoryStore::new();
        backend.set_item("savedLists", "[]").unwrap();
        let store = KeyedStore::new(backend);

        assert!(store
            .ensure("savedLists", &BTreeMap::<String, Vec<String>>::new())
            .unwrap());
        let lists: BTreeMap<String, Vec<String>> = store.get("savedLists").unwrap().unwrap();
        assert!(lists.is_empty());
    }

    #[test]
    fn test_try_update_rejection_leaves_value_untouched() {
        let store = KeyedStore::new(MemoryStore::new());
        store.set("n", &1u32).unwrap();

        let result = store.try_update::<u32, ()>("n", |n| {
            *n = 99;
            Err(StoreError::UnknownList("x".into()))
        });
        assert!(result.is_err());
        assert_eq!(store.get::<u32>("n").unwrap(), Some(1));
    }
}
