use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] store::StoreError),

    #[error(transparent)]
    Router(#[from] router::RouterError),

    #[error(transparent)]
    Api(#[from] api::ApiError),

    #[error("invalid recipe: {0}")]
    InvalidDraft(String),

    #[error("no search is active")]
    NoActiveSearch,

    #[error("no recipe is being shown")]
    NoActiveRecipe,
}
