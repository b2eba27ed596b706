//! Headless application layer of the recipe browser.
//!
//! Everything a page needs before it renders lives here: [`RecipeBook`]
//! sequences remote fetches, persistence and navigation; [`draft`] turns the
//! create-recipe form into a record; [`platform`] picks the storage backend.
//! Drawing cards and reading form fields is left to the frontend.

pub mod book;
pub mod cards;
pub mod draft;
pub mod error;
pub mod platform;

pub use book::{ActiveSearch, RecipeBook};
pub use cards::{Card, ExploreRow, ResultsPage};
pub use draft::{scale_servings, IngredientDraft, RecipeDraft};
pub use error::AppError;
pub use platform::open_store;
