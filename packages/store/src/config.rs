//! # Application configuration: `recipebook.toml`
//!
//! ## Structure
//!
//! ```toml
//! [storage]
//! records_key = "recipeData"           # namespace key of the record cache
//! lists_key = "savedLists"             # namespace key of the list registry
//! queries_key = "explore-categories"   # namespace key of the query index
//! reserved_lists = ["favorites", "created"]
//!
//! [search]
//! page_size = 5
//! explore_sections = ["Main Course", "Side Dish", "Salad", "Breakfast"]
//! explore_offset_max = 150
//! ```
//!
//! Every field has a default, so a missing or empty file is equivalent to
//! [`RecipeBookConfig::default`].

use serde::{Deserialize, Serialize};

use crate::list_registry::{CREATED, FAVORITES};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeBookConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Namespace keys and lists created at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub records_key: String,
    pub lists_key: String,
    pub queries_key: String,
    pub reserved_lists: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            records_key: "recipeData".to_string(),
            lists_key: "savedLists".to_string(),
            queries_key: "explore-categories".to_string(),
            reserved_lists: vec![FAVORITES.to_string(), CREATED.to_string()],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of cards fetched per search page.
    pub page_size: usize,
    /// Categories shown as rows on the explore page.
    pub explore_sections: Vec<String>,
    /// Explore rows start at a random offset below this bound.
    pub explore_offset_max: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            explore_sections: ["Main Course", "Side Dish", "Salad", "Breakfast"]
                .map(String::from)
                .to_vec(),
            explore_offset_max: 150,
        }
    }
}

impl RecipeBookConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "recipebook.toml"
    }

    /// Builder method to set the search page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.search.page_size = page_size;
        self
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = RecipeBookConfig::from_toml("").unwrap();
        assert_eq!(config, RecipeBookConfig::default());
        assert_eq!(config.storage.records_key, "recipeData");
        assert_eq!(config.search.page_size, 5);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = RecipeBookConfig::from_toml(
            r#"
            [search]
            page_size = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.search.page_size, 8);
        assert_eq!(config.search.explore_sections.len(), 4);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = RecipeBookConfig::default().with_page_size(12);
        let text = config.to_toml().unwrap();
        assert_eq!(RecipeBookConfig::from_toml(&text).unwrap(), config);
    }
}
