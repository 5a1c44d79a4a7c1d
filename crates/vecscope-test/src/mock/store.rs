//! In-memory store connector.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use vecscope_chroma::{
    CollectionHandle, ConnectionEndpoint, RecordSet, StoreConnector, StoreError, StoreResult,
    StoreSession,
};

const TRACING_TARGET: &str = "vecscope_test::mock";

/// A collection held by the mock store.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCollection {
    pub handle: CollectionHandle,
    pub records: RecordSet,
}

#[derive(Debug, Default)]
struct MockState {
    collections: Vec<MockCollection>,
    heartbeat: u64,
    latency: Option<Duration>,
    enumeration_failure: Option<StoreError>,
    fetch_failures: HashMap<String, StoreError>,
    delete_failures: HashMap<String, StoreError>,
    opened: Vec<ConnectionEndpoint>,
    remote_calls: usize,
}

/// In-memory [`StoreConnector`] for tests.
///
/// Clones share state, and so do all sessions opened from any clone.
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    state: Arc<Mutex<MockState>>,
}

impl MockConnector {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collection. Its identifier is derived from the name.
    pub fn with_collection(self, name: impl Into<String>, records: RecordSet) -> Self {
        let name = name.into();
        let handle = CollectionHandle::new(format!("id-{name}"), name);
        self.lock().collections.push(MockCollection { handle, records });
        self
    }

    /// Makes every enumeration fail with `error`.
    pub fn fail_enumeration(self, error: StoreError) -> Self {
        self.lock().enumeration_failure = Some(error);
        self
    }

    /// Makes fetching the named collection fail with `error`.
    pub fn fail_fetch(self, name: impl Into<String>, error: StoreError) -> Self {
        self.lock().fetch_failures.insert(name.into(), error);
        self
    }

    /// Makes deleting the named collection fail with `error`.
    pub fn fail_delete(self, name: impl Into<String>, error: StoreError) -> Self {
        self.lock().delete_failures.insert(name.into(), error);
        self
    }

    /// Sets the value returned by heartbeats.
    pub fn with_heartbeat(self, nanos: u64) -> Self {
        self.lock().heartbeat = nanos;
        self
    }

    /// Delays every remote call by `latency` before it touches the store.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.lock().latency = Some(latency);
        self
    }

    /// Returns the names of the collections currently held.
    pub fn collection_names(&self) -> Vec<String> {
        self.lock()
            .collections
            .iter()
            .map(|collection| collection.handle.name.clone())
            .collect()
    }

    /// Returns every endpoint a session was opened for.
    pub fn opened_endpoints(&self) -> Vec<ConnectionEndpoint> {
        self.lock().opened.clone()
    }

    /// Returns how many remote calls were made through any session.
    pub fn remote_calls(&self) -> usize {
        self.lock().remote_calls
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StoreConnector for MockConnector {
    fn open(&self, endpoint: &ConnectionEndpoint) -> Box<dyn StoreSession> {
        self.lock().opened.push(endpoint.clone());
        Box::new(MockSession {
            connector: self.clone(),
        })
    }
}

/// Session over a [`MockConnector`].
#[derive(Debug)]
struct MockSession {
    connector: MockConnector,
}

impl MockSession {
    /// Waits out the configured latency, then locks the shared state and
    /// counts one remote call.
    async fn call(&self) -> MutexGuard<'_, MockState> {
        let latency = self.connector.lock().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let mut state = self.connector.lock();
        state.remote_calls += 1;
        state
    }
}

#[async_trait]
impl StoreSession for MockSession {
    async fn list_collections(&self) -> StoreResult<Vec<CollectionHandle>> {
        let state = self.call().await;
        if let Some(error) = &state.enumeration_failure {
            return Err(error.clone());
        }

        Ok(state
            .collections
            .iter()
            .map(|collection| collection.handle.clone())
            .collect())
    }

    async fn fetch_records(&self, collection: &CollectionHandle) -> StoreResult<RecordSet> {
        let state = self.call().await;
        if let Some(error) = state.fetch_failures.get(&collection.name) {
            return Err(error.clone());
        }

        state
            .collections
            .iter()
            .find(|held| held.handle.id == collection.id)
            .map(|held| held.records.clone())
            .ok_or_else(|| {
                StoreError::status(404, format!("collection {} does not exist", collection.name))
            })
    }

    async fn delete_collection(&self, name: &str) -> StoreResult<()> {
        let mut state = self.call().await;
        if let Some(error) = state.delete_failures.get(name) {
            return Err(error.clone());
        }

        let before = state.collections.len();
        state.collections.retain(|held| held.handle.name != name);
        if state.collections.len() == before {
            return Err(StoreError::status(
                404,
                format!("collection {name} does not exist"),
            ));
        }

        tracing::debug!(target: TRACING_TARGET, collection = %name, "Mock collection deleted");
        Ok(())
    }

    async fn heartbeat(&self) -> StoreResult<u64> {
        let state = self.call().await;
        if let Some(error) = &state.enumeration_failure {
            return Err(error.clone());
        }
        Ok(state.heartbeat)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU16;

    use vecscope_chroma::Record;

    use super::*;

    fn endpoint() -> ConnectionEndpoint {
        ConnectionEndpoint::new("mock", NonZeroU16::new(8000).unwrap())
    }

    #[tokio::test]
    async fn sessions_share_state() {
        let connector = MockConnector::new()
            .with_collection("a", [Record::new("1")].into_iter().collect())
            .with_collection("b", RecordSet::new());

        let first = connector.open(&endpoint());
        first.delete_collection("a").await.unwrap();

        let second = connector.open(&endpoint());
        let names: Vec<_> = second
            .list_collections()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, ["b"]);
        assert_eq!(connector.opened_endpoints().len(), 2);
        assert_eq!(connector.remote_calls(), 2);
    }

    #[tokio::test]
    async fn injected_failures_are_returned() {
        let connector = MockConnector::new()
            .with_collection("a", RecordSet::new())
            .fail_fetch("a", StoreError::backend("corrupt"))
            .fail_delete("a", StoreError::connection("reset"));
        let session = connector.open(&endpoint());

        let handle = session.list_collections().await.unwrap().remove(0);
        assert_eq!(
            session.fetch_records(&handle).await,
            Err(StoreError::backend("corrupt"))
        );
        assert!(session.delete_collection("a").await.is_err());
        assert_eq!(connector.collection_names(), ["a"]);
    }

    #[tokio::test]
    async fn latency_delays_every_call() {
        let connector = MockConnector::new()
            .with_collection("a", RecordSet::new())
            .with_latency(Duration::from_millis(50));
        let session = connector.open(&endpoint());

        let started = tokio::time::Instant::now();
        session.list_collections().await.unwrap();
        session.delete_collection("a").await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(100));
        assert!(connector.collection_names().is_empty());
    }
}
