//! Failures of the HTTP server itself.

use std::io;

use thiserror::Error;

/// Result type for server operations.
pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The server configuration was rejected before binding.
    #[error("invalid server configuration: {0}")]
    InvalidConfig(String),

    /// The listening socket could not be opened.
    #[error("cannot listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Serving stopped with an I/O error.
    #[error("server failed: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    pub fn invalid_config(err: &anyhow::Error) -> Self {
        Self::InvalidConfig(format!("{err:#}"))
    }

    pub fn bind(address: impl ToString, source: io::Error) -> Self {
        Self::Bind {
            address: address.to_string(),
            source,
        }
    }

    /// Short code for log searches.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "E001",
            Self::Bind { .. } => "E002",
            Self::Runtime(_) => "E003",
        }
    }

    /// What the operator can try next, if anything obvious.
    pub fn suggestion(&self) -> Option<&'static str> {
        let kind = match self {
            Self::InvalidConfig(_) => return Some("run with --help to see accepted values"),
            Self::Bind { source, .. } | Self::Runtime(source) => source.kind(),
        };

        match kind {
            io::ErrorKind::AddrInUse => Some("another process holds the port, pick another --port"),
            io::ErrorKind::AddrNotAvailable => Some("--host is not an address of this machine"),
            io::ErrorKind::PermissionDenied => Some("binding needs privileges, use a port above 1024"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_differ_per_variant() {
        let codes = [
            ServerError::InvalidConfig(String::new()).error_code(),
            ServerError::bind("127.0.0.1:3000", io::Error::other("x")).error_code(),
            ServerError::Runtime(io::Error::other("x")).error_code(),
        ];
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
        assert_ne!(codes[0], codes[2]);
    }

    #[test]
    fn port_in_use_has_a_suggestion() {
        let err = ServerError::bind(
            "127.0.0.1:3000",
            io::Error::new(io::ErrorKind::AddrInUse, "address in use"),
        );
        assert!(err.to_string().starts_with("cannot listen on 127.0.0.1:3000"));
        assert!(err.suggestion().is_some_and(|s| s.contains("--port")));
    }

    #[test]
    fn config_errors_keep_the_chain() {
        let cause = anyhow::anyhow!("port 80 is privileged").context("invalid server configuration");
        let err = ServerError::invalid_config(&cause);
        assert!(err.to_string().contains("port 80 is privileged"));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn unknown_io_errors_have_no_suggestion() {
        assert!(ServerError::Runtime(io::Error::other("x")).suggestion().is_none());
    }
}
