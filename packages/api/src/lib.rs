//! # API crate: the remote recipe search collaborator
//!
//! The core never talks to the network itself. It consumes recipe pages
//! through the [`RecipeSource`] trait, and this crate provides the HTTP
//! implementation against a Spoonacular-compatible search API.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | API key and base URL from the environment (`.env` aware) |
//! | [`client`] | [`SpoonacularClient`], request parameter encoding, response decoding |
//! | [`error`] | [`ApiError`] |
//!
//! Failures are never retried here; they propagate to the caller, which
//! decides between showing zero results and an error state.

use std::future::Future;

pub mod client;
pub mod config;
pub mod error;

pub use client::SpoonacularClient;
pub use config::ApiConfig;
pub use error::ApiError;

pub use store::{Recipe, SearchFilters};

/// Source of recipe pages.
pub trait RecipeSource {
    /// Full-text search, `limit` results starting at `offset`.
    fn search(
        &self,
        text: &str,
        limit: usize,
        offset: usize,
        filters: &SearchFilters,
    ) -> impl Future<Output = Result<Vec<Recipe>, ApiError>>;

    /// Recipes of one meal type (e.g. `"Main Course"`), used for explore rows.
    fn by_category(
        &self,
        name: &str,
        limit: usize,
        offset: usize,
    ) -> impl Future<Output = Result<Vec<Recipe>, ApiError>>;
}
