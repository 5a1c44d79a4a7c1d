//! Shutdown signals.

use std::future::{Future, pending};
use std::io;

use tokio::signal;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Resolves on the first of Ctrl+C or, on unix, SIGTERM.
///
/// A signal whose handler cannot be installed is logged and never fires.
pub async fn shutdown_signal() {
    let name = tokio::select! {
        name = listen("SIGINT", signal::ctrl_c()) => name,
        name = listen("SIGTERM", terminate()) => name,
    };

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        signal = name,
        "Shutdown requested"
    );
}

async fn listen(name: &'static str, signal: impl Future<Output = io::Result<()>>) -> &'static str {
    if let Err(err) = signal.await {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            signal = name,
            error = %err,
            "Failed to listen for signal"
        );
        pending::<()>().await;
    }
    name
}

#[cfg(unix)]
async fn terminate() -> io::Result<()> {
    signal::unix::signal(signal::unix::SignalKind::terminate())?
        .recv()
        .await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> io::Result<()> {
    pending().await
}
