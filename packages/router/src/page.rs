use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouterError;

/// Logical pages of the app. Exactly one is visible at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Landing,
    Explore,
    SavedRecipes,
    SearchResults,
    RecipeInfo,
    #[serde(rename = "create-recipe-page")]
    CreateRecipe,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Landing,
        Page::Explore,
        Page::SavedRecipes,
        Page::SearchResults,
        Page::RecipeInfo,
        Page::CreateRecipe,
    ];

    /// Stable name, also used as the section's CSS class.
    pub fn as_str(self) -> &'static str {
        match self {
            Page::Landing => "landing",
            Page::Explore => "explore",
            Page::SavedRecipes => "saved-recipes",
            Page::SearchResults => "search-results",
            Page::RecipeInfo => "recipe-info",
            Page::CreateRecipe => "create-recipe-page",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| RouterError::UnknownPage(s.to_string()))
    }
}
