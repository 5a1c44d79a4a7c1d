//! Store client error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Maximum number of characters of an error body kept in [`StoreError::Status`].
pub(crate) const MAX_ERROR_BODY: usize = 1024;

/// Store client errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// The store did not answer in time.
    #[error("operation timed out: {0}")]
    Timeout(String),

    /// The store answered with a non-success status.
    #[error("store returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The store answered with a body that could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A request URL could not be built.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Backend-specific error.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Creates a status error, truncating long messages.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        let message: String = message.into().chars().take(MAX_ERROR_BODY).collect();
        Self::Status { status, message }
    }

    /// Creates a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    /// Creates an invalid config error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Creates a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Returns whether the store was never reached.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout(_))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(err.to_string())
        } else if err.is_connect() {
            Self::connection(err.to_string())
        } else if err.is_decode() {
            Self::serialization(err.to_string())
        } else if let Some(status) = err.status() {
            Self::status(status.as_u16(), err.to_string())
        } else {
            Self::backend(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<url::ParseError> for StoreError {
    fn from(err: url::ParseError) -> Self {
        Self::invalid_url(err.to_string())
    }
}
