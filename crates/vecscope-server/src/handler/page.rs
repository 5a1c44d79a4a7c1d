//! The browser page: a form that connects to, or deletes from, a database.
//!
//! Action failures and unusable submissions are rendered inline, so the page
//! answers `200 OK` whenever the action ran or could not start.

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};

use super::request::{PageAction, PageForm};
use super::run_to_completion;
use crate::extract::Form;
use crate::handler::{Error, Result};
use crate::service::{Inspector, ServiceState};
use crate::view::{Page, PageContent};

/// Tracing target for page actions.
const TRACING_TARGET: &str = "vecscope_server::handler::page";

async fn index(State(inspector): State<Inspector>) -> Result<Html<String>> {
    let style = &inspector.presenter().config().emphasis_style;
    Ok(Html(Page::new(style).render()?))
}

#[tracing::instrument(skip_all)]
async fn submit(
    State(inspector): State<Inspector>,
    form: std::result::Result<Form<PageForm>, Error<'static>>,
) -> Result<Html<String>> {
    let style = &inspector.presenter().config().emphasis_style;

    let form = match form {
        Ok(Form(form)) => form,
        Err(error) => {
            tracing::debug!(target: TRACING_TARGET, error = %error, "Page form rejected");
            let message = rejection_message(&error);
            let page = Page::new(style).with_content(PageContent::Rejected(&message));
            return Ok(Html(page.render()?));
        }
    };

    let page = Page::new(style).with_url(&form.url);
    let Some(url) = form.url() else {
        tracing::debug!(target: TRACING_TARGET, "Empty database url, nothing to do");
        return Ok(Html(page.render()?));
    };

    tracing::debug!(target: TRACING_TARGET, action = %form.action, "Page action submitted");
    let url = url.to_owned();
    let html = match form.action {
        PageAction::Connect => {
            let action = inspector.clone();
            match run_to_completion(async move { action.connect_and_list(&url).await }).await? {
                Ok(report) => page.with_content(PageContent::Listing(&report)).render()?,
                Err(error) => {
                    tracing::warn!(target: TRACING_TARGET, error = %error, "Connect failed");
                    page.with_content(PageContent::Failure(&error)).render()?
                }
            }
        }
        PageAction::Delete => {
            let action = inspector.clone();
            match run_to_completion(async move { action.connect_and_delete(&url).await }).await? {
                Ok(report) => page.with_content(PageContent::Deletion(&report)).render()?,
                Err(error) => {
                    tracing::warn!(target: TRACING_TARGET, error = %error, "Delete failed");
                    page.with_content(PageContent::Failure(&error)).render()?
                }
            }
        }
    };

    Ok(Html(html))
}

/// Text shown in place of the results when the submitted form is unusable.
fn rejection_message(error: &Error<'_>) -> String {
    match (error.message(), error.context()) {
        (Some(message), Some(context)) => format!("{message}: {context}"),
        (Some(text), None) | (None, Some(text)) => text.to_owned(),
        (None, None) => error.kind().response().message.into_owned(),
    }
}

/// Returns a [`Router`] with the inspector page.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/", get(index))
}

/// Returns a [`Router`] with the page's Connect and Delete actions.
pub fn action_routes() -> Router<ServiceState> {
    Router::new().route("/", post(submit))
}
