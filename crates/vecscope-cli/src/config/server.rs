//! Listening address and shutdown timeout.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::ops::RangeInclusive;
use std::time::Duration;

use anyhow::ensure;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Ports the inspector may listen on; privileged ports are refused.
const PORTS: RangeInclusive<u16> = 1024..=u16::MAX;

/// Accepted graceful shutdown timeouts, in seconds.
const SHUTDOWN_TIMEOUTS: RangeInclusive<u64> = 1..=300;

/// Where the inspector listens and how long it drains on shutdown.
///
/// ```bash
/// vecscope --host 0.0.0.0 --port 8080
/// HOST=0.0.0.0 PORT=8080 SHUTDOWN_TIMEOUT=10 vecscope
/// ```
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Address to bind; "0.0.0.0" exposes the inspector on every interface.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// TCP port, 1024-65535.
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Seconds in-flight requests may take to finish after a shutdown signal, 1-300.
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 30)]
    pub shutdown_timeout: u64,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

impl ServerConfig {
    /// Rejects privileged ports and out of range shutdown timeouts.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            PORTS.contains(&self.port),
            "port {} is privileged, pick one in {}-{}",
            self.port,
            PORTS.start(),
            PORTS.end()
        );
        ensure!(
            SHUTDOWN_TIMEOUTS.contains(&self.shutdown_timeout),
            "shutdown timeout of {}s is outside {}-{}s",
            self.shutdown_timeout,
            SHUTDOWN_TIMEOUTS.start(),
            SHUTDOWN_TIMEOUTS.end()
        );
        Ok(())
    }

    #[must_use]
    pub const fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }

    /// Whether the host is `0.0.0.0` or `::`.
    #[must_use]
    pub fn binds_to_all_interfaces(&self) -> bool {
        self.host.is_unspecified()
    }

    /// Logs the listening configuration.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            addr = %self.server_addr(),
            loopback = self.host.is_loopback(),
            shutdown_timeout_secs = self.shutdown_timeout,
            "Server configuration"
        );
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: 3000,
            shutdown_timeout: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listens_on_loopback() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.binds_to_all_interfaces());
        assert_eq!(config.server_addr().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn privileged_ports_are_refused() {
        let config = ServerConfig {
            port: 80,
            ..ServerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("port 80"));
    }

    #[test]
    fn shutdown_timeout_bounds() {
        for (secs, valid) in [(0, false), (1, true), (300, true), (301, false)] {
            let config = ServerConfig {
                shutdown_timeout: secs,
                ..ServerConfig::default()
            };
            assert_eq!(config.validate().is_ok(), valid, "{secs}s");
        }
    }

    #[test]
    fn unspecified_host_binds_everywhere() {
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            ..ServerConfig::default()
        };
        assert!(config.binds_to_all_interfaces());
    }
}
