//! Errors raised while talking to the search API

use thiserror::Error;

/// Failure of a single API request
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network unreachable, timeout, or connection reset
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// The body was not the JSON shape we expect
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// An endpoint URL could not be built
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Transport(e) if e.is_timeout())
    }
}
