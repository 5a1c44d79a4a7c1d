//! Store heartbeat check.

use axum::Router;
use axum::extract::State;
use axum::routing::post;

use super::request::DatabaseRequest;
use super::run_to_completion;
use crate::extract::Json;
use crate::handler::Result;
use crate::service::{HeartbeatReport, Inspector, ServiceState};

/// Tracing target for heartbeat checks.
const TRACING_TARGET: &str = "vecscope_server::handler::heartbeat";

#[tracing::instrument(skip_all)]
async fn heartbeat(
    State(inspector): State<Inspector>,
    Json(request): Json<DatabaseRequest>,
) -> Result<Json<HeartbeatReport>> {
    let report =
        run_to_completion(async move { inspector.heartbeat(&request.url).await }).await??;

    tracing::debug!(
        target: TRACING_TARGET,
        endpoint = %report.endpoint,
        nanos = report.nanosecond_heartbeat,
        "Store heartbeat received"
    );

    Ok(Json(report))
}

/// Returns a [`Router`] with the heartbeat check.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/api/heartbeat", post(heartbeat))
}
