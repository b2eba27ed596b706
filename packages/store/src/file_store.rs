//! # Filesystem-backed storage
//!
//! [`FileStore`] is a [`StorageBackend`] that persists each namespace key as a
//! JSON file. It is used on native platforms to keep saved recipes across app
//! restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── recipeData.json
//! ├── savedLists.json
//! └── explore-categories.json
//! ```
//!
//! Writes go to a temporary sibling first and are renamed into place, so a
//! crash mid-write leaves the previous value intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::keyed::StorageBackend;

/// Filesystem-backed StorageBackend for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn item_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '\0' => '_',
                c => c,
            })
            .collect();
        self.base.join(format!("{name}.json"))
    }
}

impl StorageBackend for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.item_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        let path = self.item_path(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecipeBookConfig;
    use crate::models::{Recipe, RecipeId};
    use crate::recipe_store::RecipeStore;
    use serde_json::json;

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = RecipeBookConfig::default();

        let store = RecipeStore::open(FileStore::new(dir.path().to_path_buf()), &config).unwrap();
        store
            .records
            .put(&RecipeId::from("7"), Recipe::new(json!({"id": 7, "title": "Tacos"})))
            .unwrap();
        store.lists.add("favorites", &RecipeId::from("7")).unwrap();

        let reopened =
            RecipeStore::open(FileStore::new(dir.path().to_path_buf()), &config).unwrap();
        let recipe = reopened.records.get(&RecipeId::from("7")).unwrap().unwrap();
        assert_eq!(recipe.title(), Some("Tacos"));
        assert_eq!(
            reopened.lists.read_all().unwrap()["favorites"],
            vec![RecipeId::from("7")]
        );
    }

    #[test]
    fn test_missing_file_is_absence() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.get_item("recipeData").unwrap(), None);

        store.set_item("recipeData", "{}").unwrap();
        assert!(dir.path().join("nested/recipeData.json").exists());
    }

    #[test]
    fn test_user_directories_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let shared = FileStore::new(dir.path().to_path_buf());
        let scoped = FileStore::new(dir.path().join("user-1"));

        scoped.set_item("savedLists", r#"{"favorites":["1"]}"#).unwrap();
        assert_eq!(shared.get_item("savedLists").unwrap(), None);
        assert!(scoped.base().join("savedLists.json").exists());
    }
}
