//! Platform store selection.
//!
//! Returns a [`store::RecipeStore`] over the appropriate backend:
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStorageStore`]
//! - **Desktop / Mobile** (native): JSON files via [`store::FileStore`]

use store::{RecipeBookConfig, RecipeStore, StorageBackend, StoreError};

/// Open the store for an optional user.
///
/// When `user_id` is `Some("uuid")`:
/// - **Web**: keys are prefixed with `"uuid:"`
/// - **Desktop/Mobile**: files live under `<data_dir>/recipebook/uuid/`
pub fn open_store(
    user_id: Option<&str>,
    config: &RecipeBookConfig,
) -> Result<RecipeStore<impl StorageBackend + Clone>, StoreError> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        RecipeStore::open(store::LocalStorageStore::with_scope(user_id), config)
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        RecipeStore::open(store::FileStore::new(data_dir(user_id)), config)
    }
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
fn data_dir(user_id: Option<&str>) -> std::path::PathBuf {
    #[cfg(not(target_arch = "wasm32"))]
    let base = dirs::data_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    #[cfg(target_arch = "wasm32")]
    let base = std::path::PathBuf::from(".");

    let base = base.join("recipebook");
    match user_id {
        Some(id) => base.join(id),
        None => base,
    }
}
