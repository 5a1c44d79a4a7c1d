//! Request timeouts and panic recovery.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::catch_panic::CatchPanicLayer;

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "vecscope_server::middleware::recovery";

/// Default request timeout, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Timeout applied to requests that do not run a store action.
///
/// Store actions are never bounded: a listing or a deletion that has started
/// runs until every collection is processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct RecoveryConfig {
    /// Seconds a request may run before it is answered with a 500.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT)
    )]
    pub request_timeout: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self::with_timeout_secs(DEFAULT_REQUEST_TIMEOUT)
    }
}

impl RecoveryConfig {
    pub fn with_timeout_secs(request_timeout: u64) -> Self {
        Self { request_timeout }
    }

    #[inline]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Extension trait for `axum::`[`Router`] to apply recovery middleware.
pub trait RouterRecoveryExt<S> {
    /// Answers timed out and panicking requests with a JSON 500.
    fn with_recovery(self, config: &RecoveryConfig) -> Self;

    /// Answers panicking requests with a JSON 500, without any timeout.
    fn with_panic_recovery(self) -> Self;

    /// Answers requests to the routes added so far with a JSON 500 once they
    /// run longer than the configured timeout.
    ///
    /// Applies to matched routes only, so routes merged in later are not
    /// bounded.
    fn with_request_timeout(self, config: &RecoveryConfig) -> Self;

    /// [`with_recovery`](Self::with_recovery) with [`RecoveryConfig::default`].
    fn with_default_recovery(self) -> Self;
}

impl<S> RouterRecoveryExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery(self, config: &RecoveryConfig) -> Self {
        self.with_request_timeout(config).with_panic_recovery()
    }

    fn with_panic_recovery(self) -> Self {
        self.layer(CatchPanicLayer::custom(panic_response))
    }

    fn with_request_timeout(self, config: &RecoveryConfig) -> Self {
        self.route_layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(middleware_error))
                .layer(TimeoutLayer::new(config.request_timeout())),
        )
    }

    fn with_default_recovery(self) -> Self {
        self.with_recovery(&RecoveryConfig::default())
    }
}

async fn middleware_error(err: tower::BoxError) -> Error<'static> {
    if err.is::<Elapsed>() {
        tracing::warn!(target: TRACING_TARGET, "Request timed out");
        return ErrorKind::InternalServerError
            .with_message("Request timeout")
            .with_context("The request exceeded the configured timeout");
    }

    tracing::error!(target: TRACING_TARGET, error = %err, "Middleware failed");
    ErrorKind::InternalServerError.with_context(err.to_string())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    tracing::error!(target: TRACING_TARGET, panic = detail, "Handler panicked");
    ErrorKind::InternalServerError
        .with_message("A handler panicked")
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;
    use crate::handler::ErrorResponse;

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "late"
    }

    async fn panics() -> &'static str {
        panic!("handler exploded")
    }

    #[tokio::test]
    async fn timeouts_become_json_errors() -> anyhow::Result<()> {
        let app: Router = Router::new()
            .route("/slow", get(slow))
            .with_recovery(&RecoveryConfig::with_timeout_secs(1));
        let server = TestServer::new(app)?;

        let response = server.get("/slow").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<ErrorResponse>();
        assert!(body.message.contains("Request timeout"));

        Ok(())
    }

    #[tokio::test]
    async fn routes_merged_after_the_timeout_are_unbounded() -> anyhow::Result<()> {
        let bounded: Router = Router::new()
            .route("/bounded", get(slow))
            .with_request_timeout(&RecoveryConfig::with_timeout_secs(1));
        let app = Router::new()
            .merge(bounded)
            .route("/unbounded", get(slow))
            .with_panic_recovery();
        let server = TestServer::new(app)?;

        server
            .get("/bounded")
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let response = server.get("/unbounded").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "late");

        Ok(())
    }

    #[tokio::test]
    async fn panics_become_json_errors() -> anyhow::Result<()> {
        let app: Router = Router::new()
            .route("/panic", get(panics))
            .with_default_recovery();
        let server = TestServer::new(app)?;

        let response = server.get("/panic").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.json::<ErrorResponse>();
        assert_eq!(body.name, "internal_server_error");

        Ok(())
    }
}
