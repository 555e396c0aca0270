//! DTOs for health check endpoint.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current server time, RFC 3339.
    pub server_time: String,
    /// `"connected"` or `"disabled"`.
    pub redis_status: String,
    pub memory_usage: MemoryUsage,
    /// Seconds since the service started.
    pub uptime: f64,
}

/// Process memory figures.
#[derive(Debug, Serialize, Deserialize)]
pub struct MemoryUsage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rss_bytes: Option<u64>,
}
