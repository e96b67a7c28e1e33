//! Error types for route registration and compilation

use thiserror::Error;

/// Errors that can occur while registering, removing or compiling routes
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Unsupported pattern '{pattern}': {reason}")]
    UnsupportedPattern { pattern: String, reason: String },

    #[error("Invalid parameter pattern in segment '{segment}': {source}")]
    InvalidRegex {
        segment: String,
        #[source]
        source: regex::Error,
    },

    #[error("Compiler mode does not support patterns after wildcard: {path}")]
    WildcardNotTerminal { path: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid function name: {0}")]
    InvalidFunctionName(String),
}

impl RouterError {
    pub(crate) fn unsupported(pattern: &str, reason: &str) -> Self {
        RouterError::UnsupportedPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for router operations
pub type RouterResult<T> = Result<T, RouterError>;
