//! Chroma connector and session built on reqwest.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::config::ChromaConfig;
use super::wire::{CollectionModel, ErrorBody, GetRequest, GetResponse, HeartbeatResponse};
use crate::endpoint::ConnectionEndpoint;
use crate::error::{StoreError, StoreResult};
use crate::record::{CollectionHandle, RecordSet};
use crate::store::{StoreConnector, StoreSession};

/// Tracing target for Chroma client operations.
const TRACING_TARGET: &str = "vecscope_chroma::client";

/// Inner state shared by the connector and every session it opens.
struct ChromaConnectorInner {
    http: Client,
    config: ChromaConfig,
}

impl std::fmt::Debug for ChromaConnectorInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromaConnectorInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Opens sessions against Chroma servers over HTTP.
///
/// The underlying HTTP client and its connection pool are created once and
/// shared by every session; sessions themselves are cheap and per action.
#[derive(Clone, Debug)]
pub struct ChromaConnector {
    inner: Arc<ChromaConnectorInner>,
}

impl ChromaConnector {
    /// Creates a connector with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ChromaConfig) -> StoreResult<Self> {
        config.validate()?;

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        tracing::debug!(
            target: TRACING_TARGET,
            api_version = %config.api_version,
            tenant = %config.tenant,
            database = %config.database,
            timeout_secs = ?config.timeout_secs,
            "Chroma connector created"
        );

        Ok(Self {
            inner: Arc::new(ChromaConnectorInner { http, config }),
        })
    }

    /// Creates a connector with default configuration.
    pub fn with_defaults() -> StoreResult<Self> {
        Self::new(ChromaConfig::default())
    }

    /// Returns the connector configuration.
    pub fn config(&self) -> &ChromaConfig {
        &self.inner.config
    }

    /// Opens a concrete session for the endpoint.
    pub fn session(&self, endpoint: &ConnectionEndpoint) -> ChromaSession {
        ChromaSession {
            inner: Arc::clone(&self.inner),
            endpoint: endpoint.clone(),
        }
    }
}

impl StoreConnector for ChromaConnector {
    fn open(&self, endpoint: &ConnectionEndpoint) -> Box<dyn StoreSession> {
        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            "Opening Chroma session"
        );
        Box::new(self.session(endpoint))
    }
}

/// A session against one Chroma server.
#[derive(Debug, Clone)]
pub struct ChromaSession {
    inner: Arc<ChromaConnectorInner>,
    endpoint: ConnectionEndpoint,
}

impl ChromaSession {
    /// Builds a request URL from percent-encoded path segments.
    fn url(&self, segments: &[&str]) -> StoreResult<Url> {
        let mut url = self.endpoint.base_url()?;
        url.path_segments_mut()
            .map_err(|()| StoreError::invalid_url("endpoint cannot carry a path"))?
            .clear()
            .extend(segments);
        Ok(url)
    }

    /// Builds the URL of the collections resource, optionally extended.
    fn collections_url(&self, extra: &[&str]) -> StoreResult<Url> {
        let mut segments = self.inner.config.collections_segments();
        segments.extend_from_slice(extra);
        self.url(&segments)
    }

    /// Sends a request and decodes a successful JSON answer.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> StoreResult<T> {
        let response = Self::check(request.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Sends a request and discards a successful answer.
    async fn send_unit(&self, request: RequestBuilder) -> StoreResult<()> {
        Self::check(request.send().await?).await?;
        Ok(())
    }

    /// Turns non-success answers into [`StoreError::Status`].
    async fn check(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::status(status.as_u16(), ErrorBody::describe(&body)))
    }
}

#[async_trait]
impl StoreSession for ChromaSession {
    async fn list_collections(&self) -> StoreResult<Vec<CollectionHandle>> {
        let started_at = Instant::now();
        let url = self.collections_url(&[])?;

        let collections: Vec<CollectionModel> =
            self.send_json(self.inner.http.get(url)).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %self.endpoint,
            count = collections.len(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Listed collections"
        );

        Ok(collections.into_iter().map(CollectionHandle::from).collect())
    }

    async fn fetch_records(&self, collection: &CollectionHandle) -> StoreResult<RecordSet> {
        let started_at = Instant::now();
        let url = self.collections_url(&[collection.id.as_str(), "get"])?;
        let request = self.inner.http.post(url).json(&GetRequest::default());

        let response: GetResponse = self.send_json(request).await?;
        let records = RecordSet::from(response);

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %self.endpoint,
            collection = %collection.name,
            count = records.len(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Fetched records"
        );

        Ok(records)
    }

    async fn delete_collection(&self, name: &str) -> StoreResult<()> {
        let url = self.collections_url(&[name])?;
        self.send_unit(self.inner.http.delete(url)).await?;

        tracing::info!(
            target: TRACING_TARGET,
            endpoint = %self.endpoint,
            collection = %name,
            "Deleted collection"
        );

        Ok(())
    }

    async fn heartbeat(&self) -> StoreResult<u64> {
        let url = self.url(&self.inner.config.heartbeat_segments())?;
        let response: HeartbeatResponse = self.send_json(self.inner.http.get(url)).await?;
        Ok(response.nanosecond_heartbeat)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU16;

    use super::*;
    use crate::client::config::ApiVersion;

    fn endpoint() -> ConnectionEndpoint {
        ConnectionEndpoint::new("localhost", NonZeroU16::new(8000).unwrap())
    }

    #[test]
    fn connector_creation() {
        assert!(ChromaConnector::with_defaults().is_ok());
    }

    #[test]
    fn connector_rejects_invalid_config() {
        let config = ChromaConfig {
            user_agent: String::new(),
            ..Default::default()
        };
        assert!(ChromaConnector::new(config).is_err());
    }

    #[test]
    fn session_urls_are_percent_encoded() {
        let connector = ChromaConnector::with_defaults().unwrap();
        let session = connector.session(&endpoint());

        let url = session.collections_url(&["my docs", "get"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v2/tenants/default_tenant/databases/default_database/collections/my%20docs/get"
        );
    }

    #[test]
    fn v1_session_urls() {
        let config = ChromaConfig::default().with_api_version(ApiVersion::V1);
        let connector = ChromaConnector::new(config).unwrap();
        let session = connector.session(&endpoint());

        assert_eq!(
            session.collections_url(&[]).unwrap().as_str(),
            "http://localhost:8000/api/v1/collections"
        );
    }
}
