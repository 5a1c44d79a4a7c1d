#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod endpoint;
mod error;
mod record;
mod store;

pub use crate::client::{
    ApiVersion, ChromaConfig, ChromaConnector, ChromaSession, DEFAULT_DATABASE, DEFAULT_TENANT,
};
pub use crate::endpoint::{ConnectionEndpoint, InvalidEndpoint, resolve};
pub use crate::error::{StoreError, StoreResult};
pub use crate::record::{CollectionHandle, Metadata, Record, RecordSet};
pub use crate::store::{StoreConnector, StoreSession};
