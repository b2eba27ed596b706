//! Named, ordered, duplicate-free lists of recipe ids.
//!
//! The set of valid list names is explicit: a list only exists after
//! [`ListRegistry::create_list`], and writes to any other name fail with
//! [`StoreError::UnknownList`].

use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::keyed::{KeyedStore, StorageBackend};
use crate::models::RecipeId;

/// Recipes the user marked as favourites.
pub const FAVORITES: &str = "favorites";
/// Recipes the user authored.
pub const CREATED: &str = "created";

type Lists = BTreeMap<String, Vec<RecipeId>>;

#[derive(Clone, Debug)]
pub struct ListRegistry<S> {
    store: KeyedStore<S>,
    key: String,
}

impl<S: StorageBackend> ListRegistry<S> {
    pub fn new(store: KeyedStore<S>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn init(&self) -> Result<(), StoreError> {
        self.store.ensure(&self.key, &Lists::new())?;
        Ok(())
    }

    /// Ensure `name` exists, leaving an existing list untouched.
    pub fn create_list(&self, name: &str) -> Result<(), StoreError> {
        self.store.update(&self.key, |lists: &mut Lists| {
            if !lists.contains_key(name) {
                tracing::info!(list = name, "creating list");
                lists.insert(name.to_string(), Vec::new());
            }
        })
    }

    /// Append `id` unless it is already a member. Returns whether it was added.
    pub fn add(&self, name: &str, id: &RecipeId) -> Result<bool, StoreError> {
        self.store.try_update(&self.key, |lists: &mut Lists| {
            let list = lists
                .get_mut(name)
                .ok_or_else(|| StoreError::UnknownList(name.to_string()))?;
            if list.contains(id) {
                return Ok(false);
            }
            list.push(id.clone());
            tracing::info!(list = name, %id, "added to list");
            Ok(true)
        })
    }

    /// Remove `id` if present. Returns whether anything was removed.
    pub fn remove(&self, name: &str, id: &RecipeId) -> Result<bool, StoreError> {
        self.store.try_update(&self.key, |lists: &mut Lists| {
            let list = lists
                .get_mut(name)
                .ok_or_else(|| StoreError::UnknownList(name.to_string()))?;
            let before = list.len();
            list.retain(|member| member != id);
            let removed = list.len() != before;
            if removed {
                tracing::info!(list = name, %id, "removed from list");
            }
            Ok(removed)
        })
    }

    /// Every list with its members in insertion order.
    pub fn read_all(&self) -> Result<BTreeMap<String, Vec<RecipeId>>, StoreError> {
        self.store.load(&self.key)
    }

    /// Members of one list, or `None` if it was never created.
    pub fn read(&self, name: &str) -> Result<Option<Vec<RecipeId>>, StoreError> {
        let mut lists: Lists = self.store.load(&self.key)?;
        Ok(lists.remove(name))
    }

    pub fn contains(&self, name: &str, id: &RecipeId) -> Result<bool, StoreError> {
        let lists: Lists = self.store.load(&self.key)?;
        Ok(lists.get(name).is_some_and(|list| list.contains(id)))
    }
}
