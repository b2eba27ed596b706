//! # Query index: paginated result ids per search
//!
//! Maps a [`QueryKey`] to the ordered ids fetched so far for that search. Each
//! "show more" request appends to the sequence, and the UI renders only the
//! newly added window via [`QueryIndex::slice_for_page`].
//!
//! Keys are canonical: [`QueryIndex::compose_key`] normalises the query text,
//! sorts set-valued filters and encodes every component as one element of a
//! JSON array. Two filter selections that mean the same thing therefore always
//! land on the same sequence, and a late response for an older search can only
//! write to that older search's key.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::StoreError;
use crate::filters::SearchFilters;
use crate::keyed::{KeyedStore, StorageBackend};
use crate::models::RecipeId;

/// Canonical identifier of one search + filter combination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryKey(String);

impl QueryKey {
    /// Key for a text search under `filters`.
    ///
    /// Invariant under permutation of cuisines and intolerances, and stable
    /// across calls.
    pub fn search(query_text: &str, filters: &SearchFilters) -> Self {
        let opt = |v: Option<String>| v.map(Value::String).unwrap_or(Value::Null);
        let key = json!([
            "search",
            normalize_text(query_text),
            filters.sort.as_str(),
            filters.direction.as_str(),
            filters.canonical_cuisines(),
            opt(filters.canonical_meal_type()),
            opt(filters.canonical_diet()),
            filters.canonical_intolerances(),
            filters.max_ready_time,
        ]);
        Self(key.to_string())
    }

    /// Key for a category listing (explore rows).
    pub fn category(name: &str) -> Self {
        Self(json!(["category", normalize_text(name)]).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

type Entries = BTreeMap<QueryKey, Vec<RecipeId>>;

#[derive(Clone, Debug)]
pub struct QueryIndex<S> {
    store: KeyedStore<S>,
    key: String,
}

impl<S> QueryIndex<S> {
    /// Derive the key for `query_text` under `filters`.
    pub fn compose_key(query_text: &str, filters: &SearchFilters) -> QueryKey {
        QueryKey::search(query_text, filters)
    }
}

impl<S: StorageBackend> QueryIndex<S> {
    pub fn new(store: KeyedStore<S>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn init(&self) -> Result<(), StoreError> {
        self.store.ensure(&self.key, &Entries::new())?;
        Ok(())
    }

    /// Extend the sequence for `key` with `ids`.
    ///
    /// Ids already recorded under `key` are skipped, so replaying a page does
    /// not duplicate results. Returns the new length of the sequence.
    pub fn append(&self, key: &QueryKey, ids: &[RecipeId]) -> Result<usize, StoreError> {
        self.store.update(&self.key, |entries: &mut Entries| {
            let seq = entries.entry(key.clone()).or_default();
            for id in ids {
                if !seq.contains(id) {
                    seq.push(id.clone());
                }
            }
            tracing::debug!(%key, len = seq.len(), "query index extended");
            seq.len()
        })
    }

    /// Every id recorded for `key`, empty if the key was never seen.
    pub fn get(&self, key: &QueryKey) -> Result<Vec<RecipeId>, StoreError> {
        let mut entries: Entries = self.store.load(&self.key)?;
        Ok(entries.remove(key).unwrap_or_default())
    }

    pub fn len(&self, key: &QueryKey) -> Result<usize, StoreError> {
        let entries: Entries = self.store.load(&self.key)?;
        Ok(entries.get(key).map_or(0, Vec::len))
    }

    /// The window `[offset, offset + limit)` of the sequence for `key`.
    ///
    /// Shorter or empty when the window runs past the end; an empty result is
    /// how callers learn a search is exhausted.
    pub fn slice_for_page(
        &self,
        key: &QueryKey,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<RecipeId>, StoreError> {
        let seq = self.get(key)?;
        Ok(seq.into_iter().skip(offset).take(limit).collect())
    }
}
