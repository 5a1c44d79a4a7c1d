use axum::extract::rejection::FormRejection;
use axum::extract::{Form as AxumForm, FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::{TRACING_TARGET, sanitize_error_message};
use crate::handler::{Error, ErrorKind};

/// Form extractor whose rejections are [`Error`]s.
///
/// Expects `application/x-www-form-urlencoded` bodies, as sent by the
/// inspector page.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Form<T>(pub T);

impl<T> Form<T> {
    /// Consumes the wrapper and returns the inner form data.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for Form<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumForm::<T>::from_request(req, state).await {
            Ok(AxumForm(form)) => Ok(Form(form)),
            Err(rejection) => Err(enhance_form_error(rejection)),
        }
    }
}

/// Maps a form rejection to a bad request with a readable explanation.
fn enhance_form_error(rejection: FormRejection) -> Error<'static> {
    tracing::debug!(
        target: TRACING_TARGET,
        error = %rejection,
        "Form data rejected"
    );

    match rejection {
        FormRejection::FailedToDeserializeForm(err) => deserialize_error(&err.body_text()),
        FormRejection::FailedToDeserializeFormBody(err) => deserialize_error(&err.body_text()),
        FormRejection::InvalidFormContentType(_) => ErrorKind::BadRequest
            .with_message("Invalid content type for form data")
            .with_context("Expected 'application/x-www-form-urlencoded' content type"),
        other => ErrorKind::BadRequest
            .with_message("Invalid form submission")
            .with_context(sanitize_error_message(&other.body_text())),
    }
}

/// Explains a form that was received but does not fit the expected fields.
fn deserialize_error(error_message: &str) -> Error<'static> {
    match extract_field_name_from_error(error_message) {
        Some(field) if error_message.contains("missing field") => ErrorKind::BadRequest
            .with_message("Missing required form field")
            .with_context(format!(
                "The form field '{field}' is required but was not provided"
            )),
        _ => ErrorKind::BadRequest
            .with_message("Invalid form data")
            .with_context(sanitize_error_message(error_message)),
    }
}

/// Extracts a backtick-quoted field name from a serde error message.
fn extract_field_name_from_error(error_message: &str) -> Option<&str> {
    let start = error_message.find('`')?;
    let end = error_message[start + 1..].find('`')?;
    Some(&error_message[start + 1..start + 1 + end])
}
