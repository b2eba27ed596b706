//! # Browser `localStorage` backend
//!
//! [`LocalStorageStore`] is the [`StorageBackend`] used on the **web platform**.
//! Each namespace key maps to one `localStorage` item holding a JSON string.
//!
//! The store is stateless and looks up `window.localStorage` on every call.
//! A page without storage access (e.g. some private browsing modes) reads as
//! empty and reports writes as backend errors.

use crate::error::StoreError;
use crate::keyed::StorageBackend;
use wasm_bindgen::JsValue;

/// `window.localStorage`-backed StorageBackend.
///
/// When a user scope is given, every key is prefixed with `"<scope>:"`, giving
/// each user an isolated set of namespaces within the same origin.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore {
    scope: Option<String>,
}

impl LocalStorageStore {
    /// Create an unscoped store.
    pub fn new() -> Self {
        Self::with_scope(None)
    }

    /// Create a store whose keys are prefixed with an optional user scope.
    pub fn with_scope(scope: Option<&str>) -> Self {
        Self {
            scope: scope.map(str::to_string),
        }
    }

    fn scoped_key(&self, key: &str) -> String {
        match &self.scope {
            Some(scope) => format!("{scope}:{key}"),
            None => key.to_string(),
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

fn js_error(e: JsValue) -> StoreError {
    StoreError::Backend(format!("{e:?}"))
}

impl StorageBackend for LocalStorageStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let Some(storage) = Self::storage() else {
            return Ok(None);
        };
        storage.get_item(&self.scoped_key(key)).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage()
            .ok_or_else(|| StoreError::Backend("localStorage is unavailable".to_string()))?;
        storage
            .set_item(&self.scoped_key(key), value)
            .map_err(js_error)
    }
}
