//! Read-only facade over the record cache and the list registry.

use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::keyed::StorageBackend;
use crate::list_registry::ListRegistry;
use crate::models::{Recipe, RecipeId};
use crate::record_cache::RecordCache;

/// An id resolved against the record cache. `recipe` is `None` for ids that
/// are referenced by a list or query but were never fetched.
#[derive(Clone, Debug, PartialEq)]
pub struct CachedEntry {
    pub id: RecipeId,
    pub recipe: Option<Recipe>,
}

#[derive(Clone, Debug)]
pub struct Fetcher<S> {
    records: RecordCache<S>,
    lists: ListRegistry<S>,
}

impl<S: StorageBackend> Fetcher<S> {
    pub fn new(records: RecordCache<S>, lists: ListRegistry<S>) -> Self {
        Self { records, lists }
    }

    pub fn get_single_recipe(&self, id: &RecipeId) -> Result<Option<Recipe>, StoreError> {
        self.records.get(id)
    }

    pub fn get_all_saved_recipe_ids(&self) -> Result<BTreeMap<String, Vec<RecipeId>>, StoreError> {
        self.lists.read_all()
    }

    /// Whether `id` is a member of list `name`.
    pub fn is_saved(&self, name: &str, id: &RecipeId) -> Result<bool, StoreError> {
        self.lists.contains(name, id)
    }

    /// Names of every list containing `id`.
    pub fn lists_containing(&self, id: &RecipeId) -> Result<Vec<String>, StoreError> {
        Ok(self
            .lists
            .read_all()?
            .into_iter()
            .filter(|(_, members)| members.contains(id))
            .map(|(name, _)| name)
            .collect())
    }

    /// Resolve `ids` in order, keeping dangling ids as entries without a record.
    pub fn resolve(&self, ids: &[RecipeId]) -> Result<Vec<CachedEntry>, StoreError> {
        Ok(self
            .records
            .get_many(ids)?
            .into_iter()
            .map(|(id, recipe)| CachedEntry { id, recipe })
            .collect())
    }

    /// Resolve every member of list `name`; an unknown list resolves to nothing.
    pub fn resolve_list(&self, name: &str) -> Result<Vec<CachedEntry>, StoreError> {
        let ids = self.lists.read(name)?.unwrap_or_default();
        self.resolve(&ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecipeBookConfig;
    use crate::recipe_store::RecipeStore;
    use crate::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_saved_lists_resolve_with_dangling_ids() {
        let store = RecipeStore::open(MemoryStore::new(), &RecipeBookConfig::default()).unwrap();
        store
            .records
            .put(&RecipeId::from("1"), Recipe::new(json!({"id": 1, "title": "Pho"})))
            .unwrap();
        store.lists.add("favorites", &RecipeId::from("1")).unwrap();
        store.lists.add("favorites", &RecipeId::from("ghost")).unwrap();

        let fetcher = store.fetcher();
        let entries = fetcher.resolve_list("favorites").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].recipe.as_ref().and_then(Recipe::title), Some("Pho"));
        assert_eq!(entries[1].id, RecipeId::from("ghost"));
        assert!(entries[1].recipe.is_none());

        assert!(fetcher.is_saved("favorites", &RecipeId::from("1")).unwrap());
        assert_eq!(
            fetcher.lists_containing(&RecipeId::from("1")).unwrap(),
            vec!["favorites".to_string()]
        );
        assert!(fetcher.resolve_list("nope").unwrap().is_empty());
    }

    #[test]
    fn test_passthroughs() {
        let store = RecipeStore::open(MemoryStore::new(), &RecipeBookConfig::default()).unwrap();
        let fetcher = store.fetcher();

        assert_eq!(fetcher.get_single_recipe(&RecipeId::from("1")).unwrap(), None);
        let saved = fetcher.get_all_saved_recipe_ids().unwrap();
        assert_eq!(saved.keys().cloned().collect::<Vec<_>>(), vec!["created", "favorites"]);
    }
}
