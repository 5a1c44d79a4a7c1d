use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{TRACING_TARGET, sanitize_error_message};
use crate::handler::{Error, ErrorKind};

/// JSON extractor and response whose rejections are [`Error`]s.
///
/// Drop-in replacement for [`axum::Json`]: malformed bodies, missing fields
/// and wrong content types are answered with the server's JSON error body
/// instead of plain text.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Returns the inner value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(target: TRACING_TARGET, error = %rejection, "JSON body rejected");

        let (message, context) = match &rejection {
            JsonRejection::JsonDataError(_) => ("Request body does not match the expected shape", None),
            JsonRejection::JsonSyntaxError(_) => ("Request body is not valid JSON", None),
            JsonRejection::MissingJsonContentType(_) => (
                "Invalid content type",
                Some("Expected 'Content-Type: application/json'"),
            ),
            _ => ("Request body could not be read", None),
        };

        let context = match context {
            Some(context) => context.to_owned(),
            None => sanitize_error_message(&rejection.body_text()),
        };

        ErrorKind::BadRequest
            .with_message(message)
            .with_context(context)
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::routing::post;
    use axum_test::TestServer;
    use serde::Deserialize;

    use super::*;
    use crate::handler::ErrorResponse;

    #[derive(Deserialize)]
    struct Body {
        #[allow(dead_code)]
        url: String,
    }

    async fn accept(Json(_): Json<Body>) -> &'static str {
        "ok"
    }

    #[tokio::test]
    async fn rejections_are_json_errors() -> anyhow::Result<()> {
        let server = TestServer::new(Router::new().route("/", post(accept)))?;

        let response = server.post("/").text("{not json").content_type("application/json").await;
        response.assert_status_bad_request();
        let body = response.json::<ErrorResponse>();
        assert!(body.message.ends_with("Request body is not valid JSON"));

        let response = server.post("/").text("{}").await;
        response.assert_status_bad_request();
        let body = response.json::<ErrorResponse>();
        assert!(body.context.is_some_and(|c| c.contains("application/json")));

        Ok(())
    }
}
