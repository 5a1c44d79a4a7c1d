use serde::{Deserialize, Serialize};

/// Liveness of the inspector itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatusResponse {
    /// Always `true` when the server answers.
    pub is_healthy: bool,
    /// Version of the running server.
    pub version: String,
}

impl MonitorStatusResponse {
    /// Status of a running server.
    pub fn healthy() -> Self {
        Self {
            is_healthy: true,
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}
