//! Search API configuration from environment variables.

use crate::error::ApiError;

const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

/// Search API endpoint configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Builder method to point at another host (e.g. a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read `SPOONACULAR_API_KEY` and optional `SPOONACULAR_BASE_URL`,
    /// loading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let api_key = lookup("SPOONACULAR_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ApiError::MissingApiKey)?;
        let config = Self::new(api_key);
        Ok(match lookup("SPOONACULAR_BASE_URL") {
            Some(url) if !url.trim().is_empty() => config.with_base_url(url),
            _ => config,
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
