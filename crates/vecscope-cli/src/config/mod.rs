//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig       # Host, port, shutdown
//! ├── recovery: RecoveryConfig   # Request timeout
//! └── service: ServiceConfig     # Chroma client, table rendering
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod server;

use std::process;

use anyhow::{Context, anyhow};
use clap::Parser;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use vecscope_server::middleware::RecoveryConfig;
use vecscope_server::service::ServiceConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Longest accepted request timeout, in seconds.
const MAX_REQUEST_TIMEOUT: u64 = 300;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "vecscope")]
#[command(about = "Browser inspector for Chroma-compatible vector stores")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// Request timeout and panic recovery.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,

    /// Chroma client and table rendering configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    ///
    /// Runs before argument parsing so that clap's `env` fallbacks see them.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// The filter is read from `RUST_LOG` and defaults to `info`.
    pub fn init_tracing() -> anyhow::Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .context("failed to create env filter")?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .try_init()
            .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;

        let timeout = self.recovery.request_timeout;
        if timeout == 0 || timeout > MAX_REQUEST_TIMEOUT {
            return Err(anyhow!(
                "Request timeout {timeout} seconds is invalid. Must be between 1 and {MAX_REQUEST_TIMEOUT} seconds."
            ));
        }

        if self.service.chroma.timeout_secs == Some(0) {
            return Err(anyhow!("Chroma timeout must be at least 1 second"));
        }

        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout,
            "Recovery configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            api_version = %self.service.chroma.api_version,
            tenant = %self.service.chroma.tenant,
            database = %self.service.chroma.database,
            timeout_secs = ?self.service.chroma.timeout_secs,
            "Chroma configuration"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            embedding_preview = self.service.presenter.embedding_preview,
            ids = %self.service.presenter.ids_emphasis,
            embeddings = %self.service.presenter.embeddings_emphasis,
            metadata = %self.service.presenter.metadata_emphasis,
            documents = %self.service.presenter.documents_emphasis,
            "Presenter configuration"
        );
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cli = Cli::parse_from(["vecscope"]);
        assert!(cli.validate().is_ok());
        assert_eq!(cli.server.port, 3000);
        assert_eq!(cli.recovery.request_timeout, 30);
        assert_eq!(cli.service.presenter.embedding_preview, 4);
    }

    #[test]
    fn arguments_reach_every_group() {
        let cli = Cli::parse_from([
            "vecscope",
            "--port",
            "8080",
            "--request-timeout",
            "60",
            "--chroma-api-version",
            "v1",
            "--documents-emphasis",
            "off",
        ]);

        assert_eq!(cli.server.port, 8080);
        assert_eq!(cli.recovery.request_timeout, 60);
        assert_eq!(cli.service.chroma.api_version.to_string(), "v1");
        assert_eq!(cli.service.presenter.documents_emphasis.to_string(), "off");
    }

    #[test]
    fn reject_invalid_request_timeout() {
        let mut cli = Cli::parse_from(["vecscope"]);
        cli.recovery.request_timeout = 0;
        assert!(cli.validate().is_err());

        cli.recovery.request_timeout = 301;
        assert!(cli.validate().is_err());
    }

    #[test]
    fn reject_zero_chroma_timeout() {
        let mut cli = Cli::parse_from(["vecscope"]);
        cli.service.chroma.timeout_secs = Some(0);
        assert!(cli.validate().is_err());
    }
}
