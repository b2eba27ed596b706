//! # Search filters
//!
//! [`SearchFilters`] is the value the UI builds once from its sort and filter
//! controls and hands to both the query index and the remote search. Set-valued
//! filters are held in [`BTreeSet`]s, so the order in which checkboxes were
//! ticked can never leak into a query key.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Field results are sorted by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Popularity,
    Healthiness,
    Price,
    Time,
    Calories,
    Protein,
    Random,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Popularity => "popularity",
            SortField::Healthiness => "healthiness",
            SortField::Price => "price",
            SortField::Time => "time",
            SortField::Calories => "calories",
            SortField::Protein => "protein",
            SortField::Random => "random",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort and filter selection for one search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default)]
    pub cuisines: BTreeSet<String>,
    #[serde(default)]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub intolerances: BTreeSet<String>,
    /// Upper bound on ready time in minutes. `None` means unbounded.
    #[serde(default)]
    pub max_ready_time: Option<u32>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sorted_by(mut self, sort: SortField, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisines.insert(cuisine.into());
        self
    }

    pub fn with_intolerance(mut self, intolerance: impl Into<String>) -> Self {
        self.intolerances.insert(intolerance.into());
        self
    }

    pub fn with_meal_type(mut self, meal_type: impl Into<String>) -> Self {
        self.meal_type = Some(meal_type.into());
        self
    }

    pub fn with_diet(mut self, diet: impl Into<String>) -> Self {
        self.diet = Some(diet.into());
        self
    }

    pub fn with_max_ready_time(mut self, minutes: u32) -> Self {
        self.max_ready_time = Some(minutes);
        self
    }

    /// Cuisines in canonical form: trimmed, lowercased, sorted, deduplicated.
    pub fn canonical_cuisines(&self) -> Vec<String> {
        canonical_set(&self.cuisines)
    }

    pub fn canonical_intolerances(&self) -> Vec<String> {
        canonical_set(&self.intolerances)
    }

    pub fn canonical_meal_type(&self) -> Option<String> {
        canonical_option(self.meal_type.as_deref())
    }

    pub fn canonical_diet(&self) -> Option<String> {
        canonical_option(self.diet.as_deref())
    }
}

fn canonical_set(values: &BTreeSet<String>) -> Vec<String> {
    values
        .iter()
        .filter_map(|v| canonical_option(Some(v)))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn canonical_option(value: Option<&str>) -> Option<String> {
    let v = value?.trim();
    (!v.is_empty()).then(|| v.to_lowercase())
}
