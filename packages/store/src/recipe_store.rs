//! # RecipeStore: the persistence core as one value
//!
//! [`RecipeStore`] opens the three namespaces over a single backend and hands
//! out the components that work on them:
//!
//! | Field / method | Namespace | Purpose |
//! |----------------|-----------|---------|
//! | [`records`](RecipeStore::records) | `recipeData` | full records by id |
//! | [`lists`](RecipeStore::lists) | `savedLists` | favourites, authored recipes |
//! | [`queries`](RecipeStore::queries) | `explore-categories` | paginated ids per search |
//! | [`fetcher`](RecipeStore::fetcher) | none | read facade for rendering |
//!
//! Opening is idempotent. Namespaces are created if absent and the reserved
//! lists are created if missing, but nothing already stored is overwritten, so
//! the same call runs safely on every app start.

use crate::config::RecipeBookConfig;
use crate::error::StoreError;
use crate::fetcher::Fetcher;
use crate::keyed::{KeyedStore, StorageBackend};
use crate::list_registry::ListRegistry;
use crate::query_index::QueryIndex;
use crate::record_cache::RecordCache;

#[derive(Clone, Debug)]
pub struct RecipeStore<S> {
    pub records: RecordCache<S>,
    pub lists: ListRegistry<S>,
    pub queries: QueryIndex<S>,
}

impl<S: StorageBackend + Clone> RecipeStore<S> {
    /// Open the store over `backend`, initialising namespaces and reserved lists.
    pub fn open(backend: S, config: &RecipeBookConfig) -> Result<Self, StoreError> {
        let keyed = KeyedStore::new(backend);
        let storage = &config.storage;
        let store = Self {
            records: RecordCache::new(keyed.clone(), storage.records_key.as_str()),
            lists: ListRegistry::new(keyed.clone(), storage.lists_key.as_str()),
            queries: QueryIndex::new(keyed, storage.queries_key.as_str()),
        };

        store.records.init()?;
        store.lists.init()?;
        store.queries.init()?;
        for name in &storage.reserved_lists {
            store.lists.create_list(name)?;
        }
        tracing::info!("recipe store opened");
        Ok(store)
    }

    pub fn fetcher(&self) -> Fetcher<S> {
        Fetcher::new(self.records.clone(), self.lists.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Recipe, RecipeId};
    use crate::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_reopen_keeps_user_data() {
        let backend = MemoryStore::new();
        let config = RecipeBookConfig::default();

        let store = RecipeStore::open(backend.clone(), &config).unwrap();
        store
            .records
            .put(&RecipeId::from("9"), Recipe::new(json!({"id": 9})))
            .unwrap();
        store.lists.add("created", &RecipeId::from("9")).unwrap();

        let again = RecipeStore::open(backend, &config).unwrap();
        assert!(again.records.contains(&RecipeId::from("9")).unwrap());
        assert!(again.lists.contains("created", &RecipeId::from("9")).unwrap());
    }

    #[test]
    fn test_open_repairs_a_corrupt_namespace() {
        let backend = MemoryStore::new();
        crate::StorageBackend::set_item(&backend, "recipeData", "garbage").unwrap();
        crate::StorageBackend::set_item(&backend, "savedLists", r#"{"favorites": ["1"]}"#)
            .unwrap();

        let store = RecipeStore::open(backend, &RecipeBookConfig::default()).unwrap();
        assert_eq!(store.records.len().unwrap(), 0);
        assert!(store.lists.contains("favorites", &RecipeId::from("1")).unwrap());
        assert_eq!(store.lists.read("created").unwrap(), Some(vec![]));
    }
}
