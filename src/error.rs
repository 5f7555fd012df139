//! Error types for sievelists.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SieveError {
    #[error("Network error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Response from {url} too large: {size} bytes (max: {max} bytes)")]
    TooLarge { url: String, size: u64, max: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid domain list {path:?}: {reason}")]
    InvalidList { path: PathBuf, reason: String },
}

impl SieveError {
    /// True for errors raised while retrieving a source.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            SieveError::Transport { .. } | SieveError::HttpStatus { .. } | SieveError::TooLarge { .. }
        )
    }
}
