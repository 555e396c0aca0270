//! Handler for health check endpoint.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::health::{HealthResponse, MemoryUsage};
use crate::state::AppState;
use crate::utils::process::resident_memory_bytes;

/// Returns service liveness and cache status.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always responds 200: a disabled cache is a degraded mode, not an outage.
///
/// # Response
///
/// ```json
/// {
///   "status": "ok",
///   "server_time": "2026-10-19T12:00:00.000Z",
///   "redis_status": "connected",
///   "memory_usage": { "rss_bytes": 8388608 },
///   "uptime": 42.5
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let redis_status = if state.store.is_enabled() {
        "connected"
    } else {
        "disabled"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        server_time: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        redis_status: redis_status.to_string(),
        memory_usage: MemoryUsage {
            rss_bytes: resident_memory_bytes(),
        },
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}
