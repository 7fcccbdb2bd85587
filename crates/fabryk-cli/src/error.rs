//! Error types for fabryk-cli

use thiserror::Error;

/// Result type alias for fabryk-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fabryk-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from the registry or its configuration
    #[error("ACL error: {0}")]
    Acl(#[from] fabryk_acl::Error),

    /// Output could not be rendered as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
