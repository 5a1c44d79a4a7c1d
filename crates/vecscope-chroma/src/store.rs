//! Store session traits.

use async_trait::async_trait;

use crate::endpoint::ConnectionEndpoint;
use crate::error::StoreResult;
use crate::record::{CollectionHandle, RecordSet};

/// A live session against one remote store.
///
/// A session belongs to a single user action and is dropped when the action
/// ends. Every method is one remote round trip with no retry.
#[async_trait]
pub trait StoreSession: Send + Sync {
    /// Lists every collection held by the store.
    async fn list_collections(&self) -> StoreResult<Vec<CollectionHandle>>;

    /// Fetches all records of a collection.
    ///
    /// Either the complete record set is returned or the call fails as a unit.
    async fn fetch_records(&self, collection: &CollectionHandle) -> StoreResult<RecordSet>;

    /// Deletes a collection by name. This cannot be undone.
    async fn delete_collection(&self, name: &str) -> StoreResult<()>;

    /// Returns the store's heartbeat timestamp in nanoseconds.
    async fn heartbeat(&self) -> StoreResult<u64>;
}

/// Opens [`StoreSession`]s for resolved endpoints.
pub trait StoreConnector: Send + Sync {
    /// Opens a session without any network I/O.
    ///
    /// An unreachable store is reported by the first call made through the
    /// returned session, not here.
    fn open(&self, endpoint: &ConnectionEndpoint) -> Box<dyn StoreSession>;
}
