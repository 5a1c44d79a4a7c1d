//! Action-level failures.

use vecscope_chroma::{ConnectionEndpoint, InvalidEndpoint, StoreError};

/// Failure that halts a whole user action.
///
/// Failures local to one collection never surface here; they are recorded in
/// the action's report instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The database URL could not be resolved. No remote call was made.
    #[error("invalid database url: {0}")]
    InvalidEndpoint(#[from] InvalidEndpoint),

    /// Collections could not be enumerated.
    #[error("failed to list collections on {endpoint}: {source}")]
    Enumeration {
        endpoint: ConnectionEndpoint,
        #[source]
        source: StoreError,
    },

    /// The store did not answer a heartbeat.
    #[error("no heartbeat from {endpoint}: {source}")]
    Heartbeat {
        endpoint: ConnectionEndpoint,
        #[source]
        source: StoreError,
    },
}

impl ActionError {
    /// Returns the endpoint the action targeted, if it was resolved.
    pub fn endpoint(&self) -> Option<&ConnectionEndpoint> {
        match self {
            Self::InvalidEndpoint(_) => None,
            Self::Enumeration { endpoint, .. } | Self::Heartbeat { endpoint, .. } => Some(endpoint),
        }
    }
}
