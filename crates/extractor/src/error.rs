// crates/extractor/src/error.rs
//! Error types for podcast extraction

use std::fmt;
use thiserror::Error;

/// Result type for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Which record a required-field failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    /// The channel-level metadata record
    Meta,
    /// The episode built from the n-th `item` node (document order, zero-based)
    Episode(usize),
}

impl fmt::Display for RecordScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meta => write!(f, "meta"),
            Self::Episode(index) => write!(f, "episode #{}", index),
        }
    }
}

/// Errors that can occur while extracting a podcast from a document tree
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    /// One or more configured required fields are absent from a record
    #[error("Required value missing in {scope}: {}", fields.join(", "))]
    RequiredFieldMissing {
        scope: RecordScope,
        fields: Vec<String>,
    },

    /// Options could not be merged or failed validation
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// The document tree does not have the expected RSS shape
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl ExtractError {
    /// Returns true if this error was caused by a missing required field
    pub fn is_required_missing(&self) -> bool {
        matches!(self, ExtractError::RequiredFieldMissing { .. })
    }
}

impl From<toml::de::Error> for ExtractError {
    fn from(err: toml::de::Error) -> Self {
        ExtractError::InvalidOptions(err.to_string())
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        ExtractError::InvalidOptions(err.to_string())
    }
}
