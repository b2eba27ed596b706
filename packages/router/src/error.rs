use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// Navigation to a page that has no registered handler, or a page name
    /// that does not exist at all.
    #[error("unknown page `{0}`")]
    UnknownPage(String),
}
