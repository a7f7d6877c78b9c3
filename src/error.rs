//! Error types for the strata-link client library.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StrataLinkError>;

/// Errors surfaced by the binding layer and the upload helpers.
///
/// All variants carry owned strings rather than source errors so the enum is
/// `Clone`; upload results are distributed to batch hooks through shared
/// futures, which requires a cloneable output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrataLinkError {
    /// A binding was constructed from a [`LinkContext`](crate::LinkContext)
    /// that holds no client. Raised before any network activity.
    #[error("no Strata client in context")]
    MissingContext,

    /// A mutation was invoked while the client reports itself disabled.
    #[error("Strata client is disabled")]
    ClientDisabled,

    /// Network-level failure (connect, send, or receive).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The server answered with a non-success HTTP status.
    #[error("Server error ({status_code}): {message}")]
    ServerError {
        /// HTTP status code returned by the server.
        status_code: u16,
        /// Response body, or a generic message when the body was unreadable.
        message: String,
    },

    /// A response body could not be decoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Invalid builder or target configuration.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Invariant violation inside the library (e.g. a panicked upload task).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<reqwest::Error> for StrataLinkError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}

impl From<serde_json::Error> for StrataLinkError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
