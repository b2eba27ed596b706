//! # RecipeBook: the glue between search, storage and navigation
//!
//! [`RecipeBook`] owns the three independent leaves of the app and sequences
//! them. Every user action follows the same order: call the remote source,
//! persist the results, navigate, then read back from the store for
//! rendering. The router and the store never see each other.
//!
//! ## Operations
//!
//! | Method | Network | Navigation |
//! |--------|---------|------------|
//! | [`search`](RecipeBook::search) | missing part of the first page | `search-results` |
//! | [`apply_filters`](RecipeBook::apply_filters) | missing part of the first page | none |
//! | [`show_more`](RecipeBook::show_more) | missing part of the next page | none |
//! | [`populate_explore`](RecipeBook::populate_explore) | one request per section | none |
//! | [`open_recipe`](RecipeBook::open_recipe) / [`create_recipe`](RecipeBook::create_recipe) | none | `recipe-info` with the id as payload |
//! | [`edit_active_recipe`](RecipeBook::edit_active_recipe) | none | `create-recipe-page` |
//! | [`handle_pop`](RecipeBook::handle_pop) | never | replayed from history |
//!
//! ## Pagination
//!
//! Results are always read back through the query index. Before a window of
//! results is shown, only the ids the index does not hold yet are requested,
//! starting at the number already known. Repeating a search, or going back to
//! one, is served from storage.

use api::RecipeSource;
use rand::Rng;
use router::{History, Page, PopEvent, Router};
use store::config::SearchConfig;
use store::{
    Fetcher, QueryKey, Recipe, RecipeId, RecipeStore, SearchFilters, StorageBackend, CREATED,
    FAVORITES,
};

use crate::cards::{Card, ExploreRow, ResultsPage};
use crate::draft::RecipeDraft;
use crate::error::AppError;

/// The search whose results are on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveSearch {
    pub text: String,
    pub filters: SearchFilters,
    pub key: QueryKey,
}

impl ActiveSearch {
    fn new(text: &str, filters: SearchFilters) -> Self {
        Self {
            key: QueryKey::search(text, &filters),
            text: text.to_string(),
            filters,
        }
    }
}

pub struct RecipeBook<S, R, H> {
    store: RecipeStore<S>,
    source: R,
    router: Router<H>,
    config: SearchConfig,
    active_search: Option<ActiveSearch>,
}

impl<S, R, H> RecipeBook<S, R, H>
where
    S: StorageBackend + Clone,
    R: RecipeSource,
    H: History,
{
    pub fn new(store: RecipeStore<S>, source: R, router: Router<H>, config: SearchConfig) -> Self {
        Self {
            store,
            source,
            router,
            config,
            active_search: None,
        }
    }

    pub fn store(&self) -> &RecipeStore<S> {
        &self.store
    }

    pub fn fetcher(&self) -> Fetcher<S> {
        self.store.fetcher()
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    pub fn router(&self) -> &Router<H> {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Router<H> {
        &mut self.router
    }

    pub fn active_search(&self) -> Option<&ActiveSearch> {
        self.active_search.as_ref()
    }

    /// Navigate to a page that needs no data loading.
    pub fn open_page(&mut self, page: Page) -> Result<(), AppError> {
        self.router.navigate(page, false)?;
        Ok(())
    }

    /// Replay a back/forward traversal from already persisted state.
    pub fn handle_pop(&mut self, event: PopEvent) -> Result<(), AppError> {
        self.router.handle_pop(event)?;
        Ok(())
    }

    /// Start a search. Blank text is ignored and returns `None`.
    pub async fn search(
        &mut self,
        text: &str,
        filters: SearchFilters,
    ) -> Result<Option<ResultsPage>, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        self.router.navigate(Page::SearchResults, false)?;
        let search = ActiveSearch::new(text, filters);
        self.active_search = Some(search.clone());
        self.results_window(&search, 0).await.map(Some)
    }

    /// Re-run the active search text under new filters.
    pub async fn apply_filters(&mut self, filters: SearchFilters) -> Result<ResultsPage, AppError> {
        let text = self
            .active_search
            .as_ref()
            .map(|s| s.text.clone())
            .ok_or(AppError::NoActiveSearch)?;
        let search = ActiveSearch::new(&text, filters);
        self.active_search = Some(search.clone());
        self.results_window(&search, 0).await
    }

    /// Next page of the active search, given how many cards are shown already.
    /// Only the new cards are returned.
    pub async fn show_more(&mut self, shown: usize) -> Result<ResultsPage, AppError> {
        let search = self
            .active_search
            .clone()
            .ok_or(AppError::NoActiveSearch)?;
        self.results_window(&search, shown).await
    }

    async fn results_window(
        &self,
        search: &ActiveSearch,
        offset: usize,
    ) -> Result<ResultsPage, AppError> {
        let limit = self.config.page_size;
        let known = self.store.queries.len(&search.key)?;
        let wanted = offset.saturating_add(limit);

        if known < wanted {
            let recipes = self
                .source
                .search(&search.text, wanted - known, known, &search.filters)
                .await?;
            let ids = self.store.records.put_batch(recipes)?;
            self.store.queries.append(&search.key, &ids)?;
        } else {
            tracing::debug!(key = %search.key, offset, "results window served from storage");
        }

        let ids = self.store.queries.slice_for_page(&search.key, offset, limit)?;
        Ok(ResultsPage::new(&search.text, self.cards(&ids)?))
    }

    /// A random starting offset for explore rows.
    pub fn random_explore_offset(&self) -> usize {
        if self.config.explore_offset_max == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..self.config.explore_offset_max)
    }

    /// Fetch one row per configured explore section, starting at `offset`.
    pub async fn populate_explore(&mut self, offset: usize) -> Vec<ExploreRow> {
        let sections = self.config.explore_sections.clone();
        let mut rows = Vec::with_capacity(sections.len());
        for section in &sections {
            let cards = self.explore_row(section, offset).await;
            if let Err(e) = &cards {
                tracing::warn!(section = section.as_str(), error = %e, "explore row failed");
            }
            rows.push(ExploreRow::new(section, cards));
        }
        rows
    }

    async fn explore_row(&self, section: &str, offset: usize) -> Result<Vec<Card>, AppError> {
        let recipes = self
            .source
            .by_category(section, self.config.page_size, offset)
            .await?;
        let ids = self.store.records.put_batch(recipes)?;
        self.store
            .queries
            .append(&QueryKey::category(section), &ids)?;
        self.cards(&ids)
    }

    /// Show the detail page for `id`. The id travels as the navigation
    /// payload, so back/forward restores the same recipe.
    pub fn open_recipe(&mut self, id: &RecipeId) -> Result<Option<Recipe>, AppError> {
        self.router
            .navigate_with(Page::RecipeInfo, id.as_str(), false)?;
        Ok(self.store.records.get(id)?)
    }

    /// Id of the recipe on the current detail or edit page.
    pub fn active_recipe_id(&self) -> Option<RecipeId> {
        match self.router.active()? {
            Page::RecipeInfo | Page::CreateRecipe => self.router.payload().map(RecipeId::from),
            _ => None,
        }
    }

    pub fn active_recipe(&self) -> Result<Option<Recipe>, AppError> {
        match self.active_recipe_id() {
            Some(id) => Ok(self.store.records.get(&id)?),
            None => Ok(None),
        }
    }

    /// Save or unsave `id` as a favourite. Returns whether it is now saved.
    pub fn toggle_favorite(&mut self, id: &RecipeId) -> Result<bool, AppError> {
        let lists = &self.store.lists;
        if lists.contains(FAVORITES, id)? {
            lists.remove(FAVORITES, id)?;
            Ok(false)
        } else {
            lists.add(FAVORITES, id)?;
            Ok(true)
        }
    }

    /// Toggle the favourite state of the recipe on the detail page.
    pub fn toggle_active_favorite(&mut self) -> Result<bool, AppError> {
        let id = self.active_recipe_id().ok_or(AppError::NoActiveRecipe)?;
        self.toggle_favorite(&id)
    }

    /// Cards for one saved list, in list order.
    pub fn saved_recipes(&self, list: &str) -> Result<Vec<Card>, AppError> {
        let ids = self.store.lists.read(list)?.unwrap_or_default();
        self.cards(&ids)
    }

    /// Store an authored recipe, add it to the created list and show it.
    /// Saving a draft with an existing title replaces that recipe.
    pub fn create_recipe(&mut self, draft: &RecipeDraft) -> Result<RecipeId, AppError> {
        let recipe = draft.to_recipe()?;
        let id = draft.id()?;
        self.store.records.put(&id, recipe)?;
        self.store.lists.add(CREATED, &id)?;
        tracing::info!(%id, "recipe created");
        self.open_recipe(&id)?;
        Ok(id)
    }

    /// Open the create page pre-filled with the recipe on the detail page.
    pub fn edit_active_recipe(&mut self) -> Result<RecipeDraft, AppError> {
        let id = self.active_recipe_id().ok_or(AppError::NoActiveRecipe)?;
        let recipe = self
            .store
            .records
            .get(&id)?
            .ok_or(AppError::NoActiveRecipe)?;
        self.router
            .navigate_with(Page::CreateRecipe, id.as_str(), false)?;
        Ok(RecipeDraft::from_recipe(&recipe))
    }

    fn cards(&self, ids: &[RecipeId]) -> Result<Vec<Card>, AppError> {
        let favorites = self.store.lists.read(FAVORITES)?.unwrap_or_default();
        Ok(self
            .store
            .fetcher()
            .resolve(ids)?
            .into_iter()
            .map(|entry| {
                let saved = favorites.contains(&entry.id);
                Card::from_entry(entry, saved)
            })
            .collect())
    }
}
