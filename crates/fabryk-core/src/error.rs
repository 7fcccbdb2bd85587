//! Error types for Fabryk operations.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! for failures that sit outside any single domain: building configuration
//! and (de)serializing values.

use thiserror::Error;

/// Errors that can occur in Fabryk operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

/// Result type alias using Fabryk's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = Error::config("missing root user");
        assert_eq!(err.to_string(), "Configuration error: missing root user");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_serialization_error_display() {
        let err = Error::serialization("bad toml");
        assert_eq!(err.to_string(), "Serialization error: bad toml");
        assert!(matches!(err, Error::Serialization(_)));
    }
}
