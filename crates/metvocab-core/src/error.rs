//! Error types for the vocabulary lookup core.
//!
//! Transport failures against the registry are soft and never show up here;
//! these variants cover caller errors, local IO and registry contract
//! violations.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for vocabulary operations.
#[derive(Debug, Error)]
pub enum VocabError {
    /// The URI cannot be mapped onto a cache file.
    #[error("Malformed URI '{uri}': {reason}")]
    MalformedUri { uri: String, reason: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A membership query was given a value of the wrong type.
    #[error("Invalid value: expected {expected}, got {actual}")]
    InvalidValue { expected: String, actual: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for vocabulary operations.
pub type Result<T> = std::result::Result<T, VocabError>;

impl From<std::io::Error> for VocabError {
    fn from(err: std::io::Error) -> Self {
        VocabError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for VocabError {
    fn from(err: serde_json::Error) -> Self {
        VocabError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for VocabError {
    fn from(err: reqwest::Error) -> Self {
        VocabError::Network {
            message: err.to_string(),
            cause: std::error::Error::source(&err).map(|s| s.to_string()),
        }
    }
}

impl VocabError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        VocabError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    pub(crate) fn malformed_uri(uri: &str, reason: impl Into<String>) -> Self {
        VocabError::MalformedUri {
            uri: uri.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this error was caused by bad input from the caller rather
    /// than by the environment or the registry.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            VocabError::MalformedUri { .. } | VocabError::InvalidValue { .. }
        )
    }
}
