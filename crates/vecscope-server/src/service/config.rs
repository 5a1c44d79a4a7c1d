//! Service configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use vecscope_chroma::{ChromaConfig, ChromaConnector};

use crate::present::{PresenterConfig, TablePresenter};
use crate::service::{Inspector, Result};

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Chroma client configuration.
    #[cfg_attr(feature = "config", command(flatten))]
    pub chroma: ChromaConfig,

    /// Table rendering configuration.
    #[cfg_attr(feature = "config", command(flatten))]
    pub presenter: PresenterConfig,
}

impl ServiceConfig {
    /// Creates the Chroma connector.
    pub fn create_connector(&self) -> Result<ChromaConnector> {
        Ok(ChromaConnector::new(self.chroma.clone())?)
    }

    /// Creates the table presenter.
    pub fn create_presenter(&self) -> TablePresenter {
        TablePresenter::new(self.presenter.clone())
    }

    /// Creates the inspector backed by Chroma.
    pub fn create_inspector(&self) -> Result<Inspector> {
        Ok(Inspector::new(
            self.create_connector()?,
            self.create_presenter(),
        ))
    }
}
