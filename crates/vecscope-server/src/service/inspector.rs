//! Orchestration of user actions against a store.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use vecscope_chroma::{
    CollectionHandle, ConnectionEndpoint, StoreConnector, StoreSession, resolve,
};

use super::error::ActionError;
use super::report::{
    CollectionOutcome, CollectionView, DeletionOutcome, DeletionReport, DeletionStatus,
    HeartbeatReport, ListingReport,
};
use crate::present::TablePresenter;

/// Tracing target for inspector actions.
const TRACING_TARGET: &str = "vecscope_server::service::inspector";

/// Runs user actions: resolve, open a session, enumerate, then render or
/// delete every collection.
///
/// Each action opens its own session and drops it on return. Remote calls of
/// an action run one after the other.
#[derive(Clone)]
pub struct Inspector {
    connector: Arc<dyn StoreConnector>,
    presenter: TablePresenter,
}

impl fmt::Debug for Inspector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inspector")
            .field("presenter", &self.presenter)
            .finish_non_exhaustive()
    }
}

impl Inspector {
    /// Creates an inspector over the given connector.
    pub fn new(connector: impl StoreConnector + 'static, presenter: TablePresenter) -> Self {
        Self {
            connector: Arc::new(connector),
            presenter,
        }
    }

    /// Returns the presenter used for listings.
    pub fn presenter(&self) -> &TablePresenter {
        &self.presenter
    }

    /// Lists every collection of the store at `raw` and renders its records.
    ///
    /// A collection whose records cannot be fetched or rendered is reported
    /// as failed and the remaining collections are still processed.
    ///
    /// # Errors
    ///
    /// Fails when `raw` does not resolve or when collections cannot be
    /// enumerated. Nothing is rendered in either case.
    pub async fn connect_and_list(&self, raw: &str) -> Result<ListingReport, ActionError> {
        let started_at = Instant::now();
        let (endpoint, session) = self.open(raw)?;
        let handles = enumerate(&endpoint, session.as_ref()).await?;

        let mut collections = Vec::with_capacity(handles.len());
        for handle in handles {
            let outcome = self.render(session.as_ref(), &handle).await;
            collections.push(CollectionView {
                name: handle.name,
                outcome,
            });
        }

        let report = ListingReport {
            endpoint,
            collections,
        };

        tracing::info!(
            target: TRACING_TARGET,
            endpoint = %report.endpoint,
            rendered = report.rendered_count(),
            failed = report.failed_count(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Collections listed"
        );

        Ok(report)
    }

    /// Deletes every collection of the store at `raw`.
    ///
    /// A failed deletion is recorded and the remaining collections are still
    /// deleted. Deletion is irreversible.
    ///
    /// # Errors
    ///
    /// Fails when `raw` does not resolve or when collections cannot be
    /// enumerated. Nothing is deleted in either case.
    pub async fn connect_and_delete(&self, raw: &str) -> Result<DeletionReport, ActionError> {
        let (endpoint, session) = self.open(raw)?;
        let handles = enumerate(&endpoint, session.as_ref()).await?;

        let mut collections = Vec::with_capacity(handles.len());
        for handle in handles {
            let status = match session.delete_collection(&handle.name).await {
                Ok(()) => DeletionStatus::Deleted,
                Err(err) => {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        endpoint = %endpoint,
                        collection = %handle.name,
                        error = %err,
                        "Collection deletion failed"
                    );
                    DeletionStatus::Failed(err.to_string())
                }
            };
            collections.push(DeletionOutcome {
                name: handle.name,
                status,
            });
        }

        let report = DeletionReport {
            endpoint,
            collections,
        };

        tracing::info!(
            target: TRACING_TARGET,
            endpoint = %report.endpoint,
            deleted = report.deleted().count(),
            failed = report.failed().count(),
            "Collections deleted"
        );

        Ok(report)
    }

    /// Asks the store at `raw` for its heartbeat.
    ///
    /// # Errors
    ///
    /// Fails when `raw` does not resolve or the store does not answer.
    pub async fn heartbeat(&self, raw: &str) -> Result<HeartbeatReport, ActionError> {
        let (endpoint, session) = self.open(raw)?;
        match session.heartbeat().await {
            Ok(nanosecond_heartbeat) => Ok(HeartbeatReport {
                endpoint,
                nanosecond_heartbeat,
            }),
            Err(source) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    endpoint = %endpoint,
                    error = %source,
                    "Heartbeat failed"
                );
                Err(ActionError::Heartbeat { endpoint, source })
            }
        }
    }

    /// Resolves the database URL and opens a session for it.
    fn open(
        &self,
        raw: &str,
    ) -> Result<(ConnectionEndpoint, Box<dyn StoreSession>), ActionError> {
        let endpoint = resolve(raw).inspect_err(|err| {
            tracing::debug!(
                target: TRACING_TARGET,
                error = %err,
                "Database url rejected"
            );
        })?;

        let session = self.connector.open(&endpoint);
        Ok((endpoint, session))
    }

    /// Fetches and renders one collection.
    async fn render(
        &self,
        session: &dyn StoreSession,
        handle: &CollectionHandle,
    ) -> CollectionOutcome {
        let records = match session.fetch_records(handle).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    collection = %handle.name,
                    error = %err,
                    "Collection fetch failed"
                );
                return CollectionOutcome::Failed(err.to_string());
            }
        };

        match self.presenter.present(&records) {
            Ok(table) => CollectionOutcome::Rendered(table),
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    collection = %handle.name,
                    error = %err,
                    "Collection rendering failed"
                );
                CollectionOutcome::Failed(err.to_string())
            }
        }
    }
}

/// Enumerates collections, turning a failure into an action error.
async fn enumerate(
    endpoint: &ConnectionEndpoint,
    session: &dyn StoreSession,
) -> Result<Vec<CollectionHandle>, ActionError> {
    session.list_collections().await.map_err(|source| {
        tracing::warn!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            error = %source,
            "Collection enumeration failed"
        );
        ActionError::Enumeration {
            endpoint: endpoint.clone(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use vecscope_chroma::{InvalidEndpoint, Record, RecordSet, StoreError};
    use vecscope_test::MockConnector;

    use super::*;
    use crate::present::ColumnKind;

    const URL: &str = "http://localhost:8000";

    fn records(ids: &[&str]) -> RecordSet {
        ids.iter()
            .map(|id| Record::new(*id).with_document(format!("document {id}")))
            .collect()
    }

    fn inspector(connector: &MockConnector) -> Inspector {
        Inspector::new(connector.clone(), TablePresenter::default())
    }

    #[tokio::test]
    async fn lists_every_collection_in_order() {
        let connector = MockConnector::new()
            .with_collection("alpha", records(&["a1", "a2"]))
            .with_collection("beta", records(&[]));

        let report = inspector(&connector).connect_and_list(URL).await.unwrap();

        assert_eq!(report.endpoint.to_string(), "localhost:8000");
        let names: Vec<_> = report.collections.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta"]);

        let alpha = report.collection("alpha").and_then(CollectionView::table).unwrap();
        assert_eq!(alpha.len(), 2);
        assert_eq!(alpha.emphasized_rows(ColumnKind::Ids), [1]);
        assert!(report.collection("beta").unwrap().table().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_fetch_is_isolated_to_its_collection() {
        let connector = MockConnector::new()
            .with_collection("first", records(&["1"]))
            .with_collection("second", records(&["2"]))
            .with_collection("third", records(&["3"]))
            .fail_fetch("second", StoreError::connection("reset by peer"));

        let report = inspector(&connector).connect_and_list(URL).await.unwrap();

        assert_eq!(report.rendered_count(), 2);
        assert!(report.collection("first").unwrap().table().is_some());
        assert!(report.collection("third").unwrap().table().is_some());
        let failure = report.collection("second").unwrap().failure().unwrap();
        assert!(failure.contains("reset by peer"));
    }

    #[tokio::test]
    async fn misaligned_records_are_isolated_to_their_collection() {
        let mut broken = records(&["x", "y"]);
        broken.embeddings.pop();
        let connector = MockConnector::new()
            .with_collection("broken", broken)
            .with_collection("fine", records(&["z"]));

        let report = inspector(&connector).connect_and_list(URL).await.unwrap();

        assert!(report.collection("broken").unwrap().failure().is_some());
        assert!(report.collection("fine").unwrap().table().is_some());
    }

    #[tokio::test]
    async fn invalid_url_makes_no_remote_call() {
        let connector = MockConnector::new().with_collection("alpha", records(&["a"]));

        let err = inspector(&connector)
            .connect_and_list("http://localhost")
            .await
            .unwrap_err();

        assert_eq!(err, ActionError::InvalidEndpoint(InvalidEndpoint::MissingPort));
        assert!(connector.opened_endpoints().is_empty());
        assert_eq!(connector.remote_calls(), 0);
    }

    #[tokio::test]
    async fn enumeration_failure_halts_listing() {
        let connector = MockConnector::new()
            .with_collection("alpha", records(&["a"]))
            .fail_enumeration(StoreError::connection("refused"));

        let err = inspector(&connector).connect_and_list(URL).await.unwrap_err();

        assert!(matches!(err, ActionError::Enumeration { .. }));
        assert_eq!(err.endpoint().map(ConnectionEndpoint::port), Some(8000));
        assert_eq!(connector.remote_calls(), 1);
    }

    #[tokio::test]
    async fn deletion_removes_every_collection() {
        let connector = MockConnector::new()
            .with_collection("a", records(&["1"]))
            .with_collection("b", records(&[]))
            .with_collection("c", records(&["2", "3"]));

        let report = inspector(&connector).connect_and_delete(URL).await.unwrap();

        assert!(report.is_complete());
        assert_eq!(report.deleted().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert!(connector.collection_names().is_empty());
    }

    #[tokio::test]
    async fn failed_deletion_does_not_stop_the_others() {
        let connector = MockConnector::new()
            .with_collection("a", records(&[]))
            .with_collection("b", records(&[]))
            .with_collection("c", records(&[]))
            .fail_delete("b", StoreError::status(500, "locked"));

        let report = inspector(&connector).connect_and_delete(URL).await.unwrap();

        assert!(!report.is_complete());
        assert_eq!(report.deleted().collect::<Vec<_>>(), ["a", "c"]);
        let failed: Vec<_> = report.failed().map(|(name, _)| name).collect();
        assert_eq!(failed, ["b"]);
        assert_eq!(connector.collection_names(), ["b"]);
    }

    #[tokio::test]
    async fn enumeration_failure_halts_deletion() {
        let connector = MockConnector::new()
            .with_collection("a", records(&[]))
            .fail_enumeration(StoreError::timeout("no answer"));

        let err = inspector(&connector).connect_and_delete(URL).await.unwrap_err();

        assert!(matches!(err, ActionError::Enumeration { .. }));
        assert_eq!(connector.collection_names(), ["a"]);
    }

    #[tokio::test]
    async fn heartbeat_reports_store_clock() {
        let connector = MockConnector::new().with_heartbeat(42);

        let report = inspector(&connector).heartbeat(URL).await.unwrap();
        assert_eq!(report.nanosecond_heartbeat, 42);

        let err = inspector(&connector).heartbeat("not a url").await.unwrap_err();
        assert!(matches!(err, ActionError::InvalidEndpoint(_)));
    }

    #[tokio::test]
    async fn each_action_opens_its_own_session() {
        let connector = MockConnector::new().with_collection("a", records(&[]));
        let inspector = inspector(&connector);

        inspector.connect_and_list(URL).await.unwrap();
        inspector.connect_and_list(URL).await.unwrap();

        assert_eq!(connector.opened_endpoints().len(), 2);
    }
}
