use store::{CachedEntry, Recipe, RecipeId};

use crate::error::AppError;

/// What the frontend draws for one recipe id.
#[derive(Clone, Debug, PartialEq)]
pub enum Card {
    Recipe {
        id: RecipeId,
        recipe: Recipe,
        /// Whether the recipe is in the favourites list.
        saved: bool,
    },
    /// The id is referenced but its record was never cached.
    Unknown { id: RecipeId },
}

impl Card {
    pub(crate) fn from_entry(entry: CachedEntry, saved: bool) -> Self {
        match entry.recipe {
            Some(recipe) => Card::Recipe {
                id: entry.id,
                recipe,
                saved,
            },
            None => Card::Unknown { id: entry.id },
        }
    }

    pub fn id(&self) -> &RecipeId {
        match self {
            Card::Recipe { id, .. } | Card::Unknown { id } => id,
        }
    }
}

/// One batch of search results.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultsPage {
    pub title: String,
    pub cards: Vec<Card>,
    /// Whether the "show more" control should stay visible.
    pub has_more: bool,
}

impl ResultsPage {
    pub(crate) fn new(query: &str, cards: Vec<Card>) -> Self {
        let title = if cards.is_empty() {
            format!("No results found for \"{query}\"")
        } else {
            format!("Top recipes for \"{query}\"")
        };
        Self {
            title,
            has_more: !cards.is_empty(),
            cards,
        }
    }
}

/// One row of the explore page. Rows load independently, so one failing
/// category does not blank the others.
#[derive(Debug)]
pub struct ExploreRow {
    pub section: String,
    pub title: String,
    pub cards: Result<Vec<Card>, AppError>,
}

impl ExploreRow {
    pub(crate) fn new(section: &str, cards: Result<Vec<Card>, AppError>) -> Self {
        Self {
            section: section.to_string(),
            title: format!("Top {section} Recipes"),
            cards,
        }
    }
}
