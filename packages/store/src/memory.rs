use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StoreError;
use crate::keyed::StorageBackend;

/// In-memory StorageBackend for testing and as a fallback when no durable
/// medium is available. Clones share the same contents.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageBackend for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let items = self
            .items
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_contents() {
        let store = MemoryStore::new();
        let other = store.clone();

        assert!(store.is_empty());
        other.set_item("recipeData", "{}").unwrap();

        assert_eq!(store.get_item("recipeData").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_item("missing").unwrap(), None);
    }
}
