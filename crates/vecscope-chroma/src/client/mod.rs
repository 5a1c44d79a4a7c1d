//! Chroma REST client.

mod config;
mod connector;
mod wire;

pub use config::{ApiVersion, ChromaConfig, DEFAULT_DATABASE, DEFAULT_TENANT};
pub use connector::{ChromaConnector, ChromaSession};
