//! Recipe records keyed by id, stored once per id.

use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::keyed::{KeyedStore, StorageBackend};
use crate::models::{Recipe, RecipeId};

type Records = BTreeMap<RecipeId, Recipe>;

/// Last-write-wins cache of full recipe records.
#[derive(Clone, Debug)]
pub struct RecordCache<S> {
    store: KeyedStore<S>,
    key: String,
}

impl<S: StorageBackend> RecordCache<S> {
    pub fn new(store: KeyedStore<S>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Create the namespace key if it does not exist yet.
    pub fn init(&self) -> Result<(), StoreError> {
        self.store.ensure(&self.key, &Records::new())?;
        Ok(())
    }

    /// Insert or fully replace the record for `id`.
    pub fn put(&self, id: &RecipeId, recipe: Recipe) -> Result<(), StoreError> {
        self.store.update(&self.key, |records: &mut Records| {
            records.insert(id.clone(), recipe);
        })
    }

    /// Store a page of fetched records, each under its own id.
    ///
    /// Records without a usable id are skipped. Returns the ids stored, in the
    /// order they were given.
    pub fn put_batch(
        &self,
        recipes: impl IntoIterator<Item = Recipe>,
    ) -> Result<Vec<RecipeId>, StoreError> {
        self.store.update(&self.key, |records: &mut Records| {
            let mut ids = Vec::new();
            for recipe in recipes {
                let Some(id) = recipe.id() else {
                    tracing::warn!("skipping recipe record without an id");
                    continue;
                };
                records.insert(id.clone(), recipe);
                ids.push(id);
            }
            ids
        })
    }

    /// Look up a record. A miss is a normal outcome, not an error.
    pub fn get(&self, id: &RecipeId) -> Result<Option<Recipe>, StoreError> {
        let mut records: Records = self.store.load(&self.key)?;
        let hit = records.remove(id);
        tracing::debug!(%id, hit = hit.is_some(), "record lookup");
        Ok(hit)
    }

    /// Look up several records at once, preserving the order of `ids`.
    pub fn get_many<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a RecipeId>,
    ) -> Result<Vec<(RecipeId, Option<Recipe>)>, StoreError> {
        let records: Records = self.store.load(&self.key)?;
        Ok(ids
            .into_iter()
            .map(|id| (id.clone(), records.get(id).cloned()))
            .collect())
    }

    pub fn contains(&self, id: &RecipeId) -> Result<bool, StoreError> {
        let records: Records = self.store.load(&self.key)?;
        Ok(records.contains_key(id))
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let records: Records = self.store.load(&self.key)?;
        Ok(records.len())
    }
}
