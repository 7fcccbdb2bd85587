//! Error types for fabryk-acl.
//!
//! Registry operations fail in exactly three ways: a duplicate create
//! ([`Error::Conflict`]), a reference to an absent identifier
//! ([`Error::NotFound`]), or an unmet structural precondition on an otherwise
//! valid target ([`Error::PreconditionFailed`]). Configuration loading adds
//! the wrapped [`fabryk_core::Error`].

use http::StatusCode;
use thiserror::Error;

use crate::types::Namespace;

/// Result type alias for fabryk-acl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fabryk-acl
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The identifier already exists, or the membership is already present.
    #[error("{namespace} entry '{id}' already exists")]
    Conflict {
        /// Namespace the duplicate was detected in
        namespace: Namespace,
        /// Offending identifier
        id: String,
    },

    /// The identifier does not exist in the namespace.
    #[error("{namespace} entry '{id}' could not be found")]
    NotFound {
        /// Namespace that was searched
        namespace: Namespace,
        /// Missing identifier
        id: String,
    },

    /// The operation's structural precondition was not met.
    #[error("Precondition failed: {message}")]
    PreconditionFailed {
        /// What was violated
        message: String,
    },

    /// Error from fabryk-core
    #[error("Core error: {0}")]
    Core(#[from] fabryk_core::Error),
}

impl Error {
    /// Creates a conflict error.
    pub fn conflict(namespace: Namespace, id: impl Into<String>) -> Self {
        Error::Conflict {
            namespace,
            id: id.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(namespace: Namespace, id: impl Into<String>) -> Self {
        Error::NotFound {
            namespace,
            id: id.into(),
        }
    }

    /// Creates a precondition-failed error.
    pub fn precondition<S: Into<String>>(message: S) -> Self {
        Error::PreconditionFailed {
            message: message.into(),
        }
    }

    /// Returns `true` for [`Error::Conflict`].
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Returns `true` for [`Error::PreconditionFailed`].
    pub fn is_precondition_failed(&self) -> bool {
        matches!(self, Error::PreconditionFailed { .. })
    }

    /// HTTP status an HTTP-facing caller should answer with.
    ///
    /// Duplicate creates map to `412 Precondition Failed`.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Conflict { .. } | Error::PreconditionFailed { .. } => {
                StatusCode::PRECONDITION_FAILED
            }
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
