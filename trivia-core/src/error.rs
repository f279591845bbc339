//! Error types for trivia-core
//!
//! Library consumers get structured `thiserror` enums; the binary wraps
//! them with `anyhow` context.

use std::path::PathBuf;

use thiserror::Error;

/// Validation error for incoming question data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty (or whitespace only) when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field is absent from the request
    #[error("missing required field '{field}'")]
    Missing { field: &'static str },

    /// Field is present but cannot be interpreted
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::Empty { field: "question" };
        assert_eq!(err.to_string(), "question cannot be empty");

        let err = ValidationError::InvalidFormat {
            field: "difficulty",
            reason: "expected an integer",
        };
        assert_eq!(err.to_string(), "difficulty: expected an integer");
    }
}
