//! JSON counterparts of the page actions.

use axum::Router;
use axum::extract::State;
use axum::routing::post;

use super::request::DatabaseRequest;
use super::run_to_completion;
use crate::extract::Json;
use crate::handler::Result;
use crate::service::{DeletionReport, Inspector, ListingReport, ServiceState};

/// Tracing target for collection operations.
const TRACING_TARGET: &str = "vecscope_server::handler::collections";

/// Lists and renders every collection of a database.
#[tracing::instrument(skip_all)]
async fn list_collections(
    State(inspector): State<Inspector>,
    Json(request): Json<DatabaseRequest>,
) -> Result<Json<ListingReport>> {
    tracing::debug!(target: TRACING_TARGET, "Listing collections");

    let report =
        run_to_completion(async move { inspector.connect_and_list(&request.url).await }).await??;

    tracing::info!(
        target: TRACING_TARGET,
        endpoint = %report.endpoint,
        rendered = report.rendered_count(),
        failed = report.failed_count(),
        "Collections listed",
    );

    Ok(Json(report))
}

/// Deletes every collection of a database.
#[tracing::instrument(skip_all)]
async fn delete_collections(
    State(inspector): State<Inspector>,
    Json(request): Json<DatabaseRequest>,
) -> Result<Json<DeletionReport>> {
    tracing::debug!(target: TRACING_TARGET, "Deleting collections");

    let report =
        run_to_completion(async move { inspector.connect_and_delete(&request.url).await })
            .await??;

    tracing::info!(
        target: TRACING_TARGET,
        endpoint = %report.endpoint,
        deleted = report.deleted().count(),
        complete = report.is_complete(),
        "Collections deleted",
    );

    Ok(Json(report))
}

/// Returns a [`Router`] with all collection related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route(
        "/api/collections",
        post(list_collections).delete(delete_collections),
    )
}
