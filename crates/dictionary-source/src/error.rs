//! Dictionary lookup errors.

use thiserror::Error;

/// Failure of a single lookup.
///
/// Backends report "no definitions" as [`SourceError::NotFound`]; every other
/// problem (transport, authentication, rate limiting, decoding) collapses
/// into [`SourceError::Other`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("No definitions found for {word}")]
    NotFound { word: String },

    #[error("{0}")]
    Other(String),
}

impl SourceError {
    pub fn not_found(word: impl Into<String>) -> Self {
        Self::NotFound { word: word.into() }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(format!("JSON error: {}", err))
    }
}
