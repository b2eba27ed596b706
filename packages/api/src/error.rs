use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("SPOONACULAR_API_KEY not set")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API responded with {status}: {body}")]
    Status { status: u16, body: String },
}
