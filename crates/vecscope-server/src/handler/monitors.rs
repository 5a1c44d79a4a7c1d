//! Liveness of the inspector itself.

use axum::Router;
use axum::routing::get;

use super::response::MonitorStatusResponse;
use crate::extract::Json;
use crate::service::ServiceState;

async fn health_status() -> Json<MonitorStatusResponse> {
    Json(MonitorStatusResponse::healthy())
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}

#[cfg(test)]
mod tests {
    use vecscope_test::MockConnector;

    use super::*;
    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn health_does_not_touch_the_store() -> anyhow::Result<()> {
        let connector = MockConnector::new();
        let server = create_test_server(&connector)?;

        let response = server.get("/health").await;
        response.assert_status_ok();
        let status = response.json::<MonitorStatusResponse>();
        assert!(status.is_healthy);
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(connector.remote_calls(), 0);

        Ok(())
    }
}
