//! # HTTP search client
//!
//! [`SpoonacularClient`] implements [`RecipeSource`] over the `complexSearch`
//! endpoint. Both operations ask for full recipe information so that each
//! result can be cached as a complete record and rendered on the detail page
//! without a second request.
//!
//! Parameter encoding is kept in pure functions ([`search_params`],
//! [`category_params`]) so it can be tested without a network.

use reqwest::Client;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::RecipeSource;
use store::{Recipe, SearchFilters};

const SEARCH_PATH: &str = "recipes/complexSearch";

/// `complexSearch` response body. Only the result list is used.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Recipe>,
}

type Params = Vec<(&'static str, String)>;

fn page_params(limit: usize, offset: usize) -> Params {
    vec![
        ("number", limit.to_string()),
        ("offset", offset.to_string()),
        ("addRecipeInformation", "true".to_string()),
        ("fillIngredients", "true".to_string()),
    ]
}

/// Query parameters for a text search.
///
/// Empty filters are omitted rather than sent blank. Set-valued filters are
/// sent in canonical (sorted) order.
pub fn search_params(text: &str, limit: usize, offset: usize, filters: &SearchFilters) -> Params {
    let mut params = vec![("query", text.trim().to_string())];
    params.extend(page_params(limit, offset));
    params.push(("sort", filters.sort.as_str().to_string()));
    params.push(("sortDirection", filters.direction.as_str().to_string()));

    let cuisines = filters.canonical_cuisines();
    if !cuisines.is_empty() {
        params.push(("cuisine", cuisines.join(",")));
    }
    if let Some(meal_type) = filters.canonical_meal_type() {
        params.push(("type", meal_type));
    }
    if let Some(diet) = filters.canonical_diet() {
        params.push(("diet", diet));
    }
    let intolerances = filters.canonical_intolerances();
    if !intolerances.is_empty() {
        params.push(("intolerances", intolerances.join(",")));
    }
    if let Some(minutes) = filters.max_ready_time {
        params.push(("maxReadyTime", minutes.to_string()));
    }
    params
}

/// Query parameters for a category listing, most popular first.
pub fn category_params(name: &str, limit: usize, offset: usize) -> Params {
    let mut params = vec![("type", name.trim().to_lowercase())];
    params.extend(page_params(limit, offset));
    params.push(("sort", "popularity".to_string()));
    params
}

#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    http: Client,
    config: ApiConfig,
}

impl SpoonacularClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Build a client from `SPOONACULAR_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(ApiConfig::from_env()?))
    }

    async fn fetch(&self, mut params: Params) -> Result<Vec<Recipe>, ApiError> {
        params.push(("apiKey", self.config.api_key.clone()));
        let response = self
            .http
            .get(self.config.endpoint(SEARCH_PATH))
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "search request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: SearchResponse = response.json().await?;
        tracing::debug!(results = body.results.len(), "search page received");
        Ok(body.results)
    }
}

impl RecipeSource for SpoonacularClient {
    async fn search(
        &self,
        text: &str,
        limit: usize,
        offset: usize,
        filters: &SearchFilters,
    ) -> Result<Vec<Recipe>, ApiError> {
        self.fetch(search_params(text, limit, offset, filters)).await
    }

    async fn by_category(
        &self,
        name: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Recipe>, ApiError> {
        self.fetch(category_params(name, limit, offset)).await
    }
}
