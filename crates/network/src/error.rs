// crates/network/src/error.rs
//! Error types for feed fetching

use podfeed_feed_parser::FeedError;
use std::time::Duration;
use thiserror::Error;

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors that can occur while fetching a feed
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The server rejected the request with HTTP 401
    #[error("Unauthorized (HTTP 401): {url}")]
    Unauthorized { url: String },

    /// Any other non-success HTTP status
    #[error("HTTP {status}: {url}")]
    Status { status: u16, url: String },

    /// The request did not finish in time
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A configured header name or value is not valid
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The fetched body could not be parsed or extracted
    #[error(transparent)]
    Feed(#[from] FeedError),
}

impl NetworkError {
    /// Returns true if retrying the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::Timeout(_) | NetworkError::Http(_) => true,
            NetworkError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the error is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        match self {
            NetworkError::Unauthorized { .. } => true,
            NetworkError::Status { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }
}
