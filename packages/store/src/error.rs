use thiserror::Error;

/// Errors raised by the keyed store and the components layered on it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The value under a namespace key does not parse as the expected shape.
    #[error("stored value under `{key}` is corrupt: {source}")]
    Corruption {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A write targeted a list that was never created.
    #[error("unknown list `{0}`")]
    UnknownList(String),

    #[error("failed to encode value for `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
