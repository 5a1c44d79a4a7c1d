#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process::ExitCode;

use anyhow::Context;
use axum::Router;
use vecscope_server::handler::routes;
use vecscope_server::middleware::{RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt};
use vecscope_server::service::ServiceState;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "vecscope_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "vecscope_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "vecscope_cli::config";

#[tokio::main]
async fn main() -> ExitCode {
    let Err(error) = run().await else {
        tracing::info!(target: TRACING_TARGET_SERVER_SHUTDOWN, "Inspector stopped");
        return ExitCode::SUCCESS;
    };

    // Tracing may not be installed yet when configuration fails.
    let message = format!("{error:#}");
    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %message,
            "Inspector failed"
        );
    } else {
        eprintln!("Error: {message}");
    }

    ExitCode::FAILURE
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing().context("failed to initialize tracing")?;
    cli.log();
    cli.validate()?;

    let state = ServiceState::from_config(&cli.service)
        .context("failed to create service state")?;
    let router = create_router(state, &cli.recovery);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Panic recovery (outermost) - panics become JSON errors
/// 2. Observability - request IDs and tracing spans
/// 3. Routes (innermost) - page and API handlers; only the page and health
///    routes carry the request timeout, store actions always run to the end
fn create_router(state: ServiceState, recovery: &RecoveryConfig) -> Router {
    routes(recovery)
        .with_state(state)
        .with_observability()
        .with_panic_recovery()
}
