//! Request extractors that answer rejections with the server's JSON errors.

mod form;
mod json;

pub use self::form::Form;
pub use self::json::Json;

/// Tracing target for extractor rejections.
const TRACING_TARGET: &str = "vecscope_server::extract";

/// Shortens a rejection message to a single bounded line.
fn sanitize_error_message(message: &str) -> String {
    let lines = message.lines().take(3).collect::<Vec<_>>();
    lines.join(" ").chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_joins_and_truncates() {
        assert_eq!(sanitize_error_message("a\nb\nc\nd"), "a b c");
        assert_eq!(sanitize_error_message(&"x".repeat(500)).len(), 200);
    }
}
