//! Configuration for the Chroma client.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::{StoreError, StoreResult};

/// Tenant used when none is configured.
pub const DEFAULT_TENANT: &str = "default_tenant";

/// Database used when none is configured.
pub const DEFAULT_DATABASE: &str = "default_database";

/// Chroma REST API generation to speak.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    AsRefStr
)]
#[cfg_attr(feature = "config", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ApiVersion {
    /// `/api/v1`, collections addressed without tenant or database.
    V1,
    /// `/api/v2`, collections scoped by tenant and database.
    #[default]
    V2,
}

/// Configuration for the Chroma client.
///
/// # Environment Variables
///
/// - `CHROMA_API_VERSION` - `v1` or `v2` (default: v2)
/// - `CHROMA_TENANT` - tenant for v2 paths (default: default_tenant)
/// - `CHROMA_DATABASE` - database for v2 paths (default: default_database)
/// - `CHROMA_TIMEOUT_SECS` - per-request timeout, unset means none
/// - `CHROMA_USER_AGENT` - User-Agent header sent with every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ChromaConfig {
    /// Chroma REST API version.
    #[cfg_attr(
        feature = "config",
        arg(long = "chroma-api-version", env = "CHROMA_API_VERSION", value_enum, default_value_t = ApiVersion::V2)
    )]
    #[serde(default)]
    pub api_version: ApiVersion,

    /// Tenant that owns the listed collections (v2 only).
    #[cfg_attr(
        feature = "config",
        arg(long = "chroma-tenant", env = "CHROMA_TENANT", default_value = DEFAULT_TENANT)
    )]
    pub tenant: String,

    /// Database that holds the listed collections (v2 only).
    #[cfg_attr(
        feature = "config",
        arg(long = "chroma-database", env = "CHROMA_DATABASE", default_value = DEFAULT_DATABASE)
    )]
    pub database: String,

    /// Per-request timeout in seconds. Requests wait indefinitely when unset.
    #[cfg_attr(
        feature = "config",
        arg(long = "chroma-timeout-secs", env = "CHROMA_TIMEOUT_SECS")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request.
    #[cfg_attr(
        feature = "config",
        arg(long = "chroma-user-agent", env = "CHROMA_USER_AGENT", default_value_t = default_user_agent())
    )]
    pub user_agent: String,
}

/// Returns the default user agent string.
fn default_user_agent() -> String {
    format!("vecscope/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            api_version: ApiVersion::default(),
            tenant: DEFAULT_TENANT.to_owned(),
            database: DEFAULT_DATABASE.to_owned(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ChromaConfig {
    /// Selects the API version.
    pub fn with_api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    /// Sets the tenant and database for v2 paths.
    pub fn with_scope(mut self, tenant: impl Into<String>, database: impl Into<String>) -> Self {
        self.tenant = tenant.into();
        self.database = database.into();
        self
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Returns the per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.timeout_secs == Some(0) {
            return Err(StoreError::invalid_config("timeout cannot be zero"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(StoreError::invalid_config("user_agent cannot be empty"));
        }
        if self.api_version == ApiVersion::V2 {
            if self.tenant.trim().is_empty() {
                return Err(StoreError::invalid_config("tenant cannot be empty"));
            }
            if self.database.trim().is_empty() {
                return Err(StoreError::invalid_config("database cannot be empty"));
            }
        }
        Ok(())
    }

    /// Path segments of the collections resource.
    pub(crate) fn collections_segments(&self) -> Vec<&str> {
        match self.api_version {
            ApiVersion::V1 => vec!["api", "v1", "collections"],
            ApiVersion::V2 => vec![
                "api",
                "v2",
                "tenants",
                self.tenant.as_str(),
                "databases",
                self.database.as_str(),
                "collections",
            ],
        }
    }

    /// Path segments of the heartbeat resource.
    pub(crate) fn heartbeat_segments(&self) -> Vec<&str> {
        vec!["api", self.api_version.as_ref(), "heartbeat"]
    }
}
