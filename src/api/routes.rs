//! API route configuration.

use crate::api::handlers::{health_handler, top_users_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes whose JSON output is memoized by the response cache.
///
/// # Endpoints
///
/// - `GET /users` - Top five users by post count
pub fn cached_routes() -> Router<AppState> {
    Router::new().route("/users", get(top_users_handler))
}

/// Routes that are always computed fresh.
///
/// # Endpoints
///
/// - `GET /health` - Liveness, cache status, memory and uptime
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
