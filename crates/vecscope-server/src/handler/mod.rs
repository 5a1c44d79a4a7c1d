//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use vecscope_server::handler::routes;
//! use vecscope_server::middleware::RecoveryConfig;
//! use vecscope_server::service::{ServiceConfig, ServiceState};
//!
//! # fn example() -> vecscope_server::Result<()> {
//! let state = ServiceState::from_config(&ServiceConfig::default())?;
//! let app: axum::Router = routes(&RecoveryConfig::default()).with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod collections;
mod error;
mod heartbeat;
mod monitors;
mod page;
mod request;
mod response;

use std::panic;

use axum::Router;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::request::{DatabaseRequest, PageAction, PageForm};
pub use crate::handler::response::{ErrorResponse, MonitorStatusResponse};
use crate::middleware::{RecoveryConfig, RouterRecoveryExt};
use crate::service::ServiceState;

/// Tracing target for route assembly and detached actions.
const TRACING_TARGET: &str = "vecscope_server::handler";

#[inline]
async fn fallback(uri: Uri) -> Response {
    ErrorKind::NotFound
        .with_resource(uri.path().to_owned())
        .into_response()
}

/// Runs a store action on its own task and waits for it.
///
/// Dropping the request (client gone, server timeout) does not stop the
/// action: a deletion that has started deletes every collection it listed.
async fn run_to_completion<F>(action: F) -> Result<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(action).await.map_err(|err| {
        if err.is_panic() {
            panic::resume_unwind(err.into_panic());
        }

        tracing::error!(target: TRACING_TARGET, error = %err, "Store action was cancelled");
        ErrorKind::InternalServerError
            .with_message("The store action was cancelled")
            .with_context(err.to_string())
    })
}

/// Returns a [`Router`] with all routes.
///
/// Only the page itself, the health check and the fallback are bounded by the
/// request timeout. Store actions run until they finish.
pub fn routes(recovery: &RecoveryConfig) -> Router<ServiceState> {
    let bounded = Router::new()
        .merge(page::routes())
        .merge(monitors::routes())
        .fallback(fallback)
        .with_request_timeout(recovery);

    let actions = Router::new()
        .merge(page::action_routes())
        .merge(collections::routes())
        .merge(heartbeat::routes());

    Router::new().merge(bounded).merge(actions)
}
