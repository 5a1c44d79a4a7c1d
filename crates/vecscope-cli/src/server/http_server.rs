//! HTTP server startup.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::lifecycle::serve_with_shutdown;
use super::{Result, ServerError, shutdown_signal};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Binds to the configured address and serves `app` with graceful shutdown.
///
/// In-flight requests get `shutdown_timeout` to finish once a signal arrives.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> Result<()> {
    if let Err(validation_error) = server_config.validate() {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            error = %validation_error,
            "Invalid server configuration"
        );

        return Err(ServerError::invalid_config(&validation_error));
    }

    let server_addr = server_config.server_addr();
    let listener = match TcpListener::bind(server_addr).await {
        Ok(listener) => listener,
        Err(listener_err) => {
            let error = ServerError::bind(server_addr, listener_err);
            tracing::error!(
                target: TRACING_TARGET_SERVER_STARTUP,
                addr = %server_addr,
                error = %error,
                suggestion = error.suggestion(),
                "Failed to bind to address"
            );
            return Err(error);
        }
    };

    let shutdown_timeout = server_config.shutdown_timeout();
    let signalled = Arc::new(Notify::new());
    let signal = {
        let signalled = Arc::clone(&signalled);
        async move {
            shutdown_signal().await;
            signalled.notify_one();
        }
    };

    serve_with_shutdown(&server_config, || async move {
        let server = axum::serve(listener, app).with_graceful_shutdown(signal);
        tokio::select! {
            result = async move { server.await } => result,
            () = async {
                signalled.notified().await;
                tokio::time::sleep(shutdown_timeout).await;
            } => {
                tracing::warn!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    timeout_secs = shutdown_timeout.as_secs(),
                    "Graceful shutdown timed out, dropping open connections"
                );
                Ok(())
            }
        }
    })
    .await
}
