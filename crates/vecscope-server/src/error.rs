//! Errors raised while assembling the inspector from configuration.

use std::error::Error as StdError;

use strum::{AsRefStr, Display};
use vecscope_chroma::StoreError;

/// Boxed error source that is `Send + Sync`.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result type alias for service setup.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// What went wrong while building the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A configuration value was rejected.
    Config,
    /// The vector store client could not be created.
    External,
    /// Anything else.
    Internal,
}

/// Service setup error.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    /// Creates an error without a source.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying error.
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        let kind = match err {
            StoreError::InvalidConfig(_) | StoreError::InvalidUrl(_) => ErrorKind::Config,
            _ => ErrorKind::External,
        };
        Self::new(kind, format!("chroma: {err}")).with_source(err)
    }
}
