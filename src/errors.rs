use thiserror::Error;

/// Error type that captures common quoting failures.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Fetch failed: {0}")]
    Fetch(String),
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Not ready for submission: {0}")]
    NotReady(String),
}
