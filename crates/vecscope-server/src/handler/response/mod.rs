//! Response types for HTTP handlers.

mod error_response;
mod monitors;

pub use error_response::ErrorResponse;
pub use monitors::MonitorStatusResponse;
