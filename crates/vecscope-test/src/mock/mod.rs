//! Store doubles.

mod store;

pub use store::{MockCollection, MockConnector};
