pub mod config;
pub mod error;
pub mod fetcher;
pub mod filters;
pub mod keyed;
pub mod list_registry;
pub mod models;
pub mod query_index;
pub mod record_cache;
pub mod recipe_store;

mod file_store;
pub use file_store::FileStore;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use config::RecipeBookConfig;
pub use error::StoreError;
pub use fetcher::{CachedEntry, Fetcher};
pub use filters::{SearchFilters, SortDirection, SortField};
pub use keyed::{KeyedStore, StorageBackend};
pub use list_registry::{ListRegistry, CREATED, FAVORITES};
pub use models::{Recipe, RecipeId};
pub use query_index::{QueryIndex, QueryKey};
pub use record_cache::RecordCache;
pub use recipe_store::RecipeStore;
