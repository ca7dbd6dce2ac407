//! Error handling for Gatehouse.
//!
//! Error messages are designed to be informative for operators while not
//! exposing whether a particular account exists in any backing system.

use thiserror::Error;

/// Result type alias using the Gatehouse error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Gatehouse operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Resource not found.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// A backing system of record is unreachable or erroring.
    #[error("upstream service unavailable: {0}")]
    Upstream(String),

    /// Authentication failed.
    ///
    /// Uses a generic message to prevent user enumeration.
    #[error("authentication failed")]
    Authentication,

    /// Internal error.
    #[error("internal error")]
    Internal,
}

impl Error {
    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Upstream(_) | Self::Internal)
    }

    /// Returns whether this error represents a client error.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Authentication | Self::NotFound(_))
    }
}
