use crate::handler::{Error, ErrorKind};

/// Tracing target for page rendering failures.
const TRACING_TARGET: &str = "vecscope_server::handler::render";

impl From<minijinja::Error> for Error<'static> {
    fn from(error: minijinja::Error) -> Self {
        tracing::error!(target: TRACING_TARGET, error = %error, "Page rendering failed");
        ErrorKind::InternalServerError
            .with_message("Failed to render the page")
            .with_context(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use minijinja::ErrorKind as TemplateErrorKind;

    use super::*;

    #[test]
    fn template_failures_are_internal_errors() {
        let cause = minijinja::Error::new(TemplateErrorKind::TemplateNotFound, "page.html");
        let error = Error::from(cause);
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert!(error.context().is_some_and(|context| context.contains("page.html")));
    }
}
