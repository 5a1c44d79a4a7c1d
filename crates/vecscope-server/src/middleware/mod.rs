//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Recovery: handler panics, and timeouts of the routes that opt in, become
//!   JSON errors.
//! - Observability: request ids and request tracing.
//!
//! ```rust,no_run
//! use axum::Router;
//! use axum::routing::get;
//! use vecscope_server::middleware::{RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt};
//!
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "ok" }))
//!     .with_recovery(&RecoveryConfig::with_timeout_secs(10))
//!     .with_observability();
//! ```

mod observability;
mod recovery;

pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
