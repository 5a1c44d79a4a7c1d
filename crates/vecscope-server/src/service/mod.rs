//! Application state and dependency injection.

mod config;
mod error;
mod inspector;
mod report;

pub use crate::service::config::ServiceConfig;
pub use crate::service::error::ActionError;
pub use crate::service::inspector::Inspector;
pub use crate::service::report::{
    CollectionOutcome, CollectionView, DeletionOutcome, DeletionReport, DeletionStatus,
    HeartbeatReport, ListingReport,
};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    inspector: Inspector,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// No store is contacted: sessions are opened per user action.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self::new(config.create_inspector()?))
    }

    /// Creates application state around an existing inspector.
    pub fn new(inspector: Inspector) -> Self {
        Self { inspector }
    }

    /// Returns the inspector.
    pub fn inspector(&self) -> &Inspector {
        &self.inspector
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(inspector: Inspector);
