//! Database URL resolution.

use std::fmt;
use std::num::NonZeroU16;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Reasons a database URL cannot be turned into a [`ConnectionEndpoint`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEndpoint {
    /// The input was empty or whitespace only.
    #[error("no database url was provided")]
    Empty,

    /// The input is not a URL at all.
    #[error("malformed url: {0}")]
    Malformed(String),

    /// The URL parsed but carries no host.
    #[error("url has no host")]
    MissingHost,

    /// The URL parsed but carries no explicit port.
    #[error("url has no port")]
    MissingPort,

    /// The port parsed but cannot address a server.
    #[error("port {0} is out of range")]
    PortOutOfRange(u16),
}

/// Host and port of a remote store, derived from a database URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionEndpoint {
    host: String,
    port: NonZeroU16,
    #[serde(default)]
    secure: bool,
}

impl ConnectionEndpoint {
    /// Creates a plain-HTTP endpoint.
    pub fn new(host: impl Into<String>, port: NonZeroU16) -> Self {
        Self {
            host: host.into(),
            port,
            secure: false,
        }
    }

    /// Selects HTTPS instead of HTTP for requests to this endpoint.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Returns the host, with brackets for IPv6 literals.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[inline]
    pub fn port(&self) -> u16 {
        self.port.get()
    }

    /// Returns whether requests use HTTPS.
    #[inline]
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Returns the root URL requests are built from.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        let scheme = if self.secure { "https" } else { "http" };
        Url::parse(&format!("{scheme}://{}:{}/", self.host, self.port))
    }
}

impl fmt::Display for ConnectionEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Resolves a free-form database URL into a [`ConnectionEndpoint`].
///
/// Both a host and an explicit numeric port must be present. No scheme is
/// assumed, so `localhost:8000` is rejected while `http://localhost:8000` is
/// accepted. Port `0` is rejected. This never performs any I/O.
///
/// # Examples
///
/// ```
/// use vecscope_chroma::{InvalidEndpoint, resolve};
///
/// let endpoint = resolve("http://localhost:9000").unwrap();
/// assert_eq!(endpoint.host(), "localhost");
/// assert_eq!(endpoint.port(), 9000);
///
/// assert_eq!(resolve("http://localhost"), Err(InvalidEndpoint::MissingPort));
/// ```
pub fn resolve(raw: &str) -> Result<ConnectionEndpoint, InvalidEndpoint> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(InvalidEndpoint::Empty);
    }

    let url = Url::parse(raw).map_err(|err| InvalidEndpoint::Malformed(err.to_string()))?;
    let host = url
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or(InvalidEndpoint::MissingHost)?;
    let port = explicit_port(&url, raw).ok_or(InvalidEndpoint::MissingPort)?;
    let port = NonZeroU16::new(port).ok_or(InvalidEndpoint::PortOutOfRange(port))?;
    let secure = url.scheme().eq_ignore_ascii_case("https");

    Ok(ConnectionEndpoint::new(host, port).with_secure(secure))
}

/// Returns the port written in `raw`.
///
/// The URL parser drops a port equal to the scheme's default, so that case is
/// recovered from the authority section of the raw input.
fn explicit_port(url: &Url, raw: &str) -> Option<u16> {
    if let Some(port) = url.port() {
        return Some(port);
    }

    let default = url.port_or_known_default()?;
    let (_, rest) = raw.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let (_, port) = authority.rsplit_once(':')?;

    port.parse::<u16>().ok().filter(|port| *port == default)
}
