//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /users`  - Top users leaderboard (response cached per credential)
//! - `GET /health` - Liveness and cache status
//!
//! # Middleware
//!
//! - **Response cache** - Memoizes `/users` output for the configured TTL
//! - **Rate limiting** - Pass-through hook
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::not_found_handler;
use crate::api::middleware::{ResponseCache, rate_limit, response_cache, tracing};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Logical cache key of the top users response.
pub const TOP_USERS_CACHE_KEY: &str = "top_users";

/// Builds the router with all routes and middleware, without path normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `access_token` - the upstream credential; its fingerprint namespaces cache keys
/// - `cache_ttl_seconds` - lifetime of cached responses
pub fn router(state: AppState, access_token: &str, cache_ttl_seconds: u64) -> Router {
    let top_users_cache = ResponseCache::new(
        state.store.clone(),
        TOP_USERS_CACHE_KEY,
        access_token,
        cache_ttl_seconds,
    );

    let cached = api::routes::cached_routes().route_layer(middleware::from_fn_with_state(
        top_users_cache,
        response_cache::layer,
    ));

    Router::new()
        .merge(cached)
        .merge(api::routes::public_routes())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(rate_limit::layer))
        .layer(tracing::layer())
}

/// Constructs the application router, trimming trailing slashes before routing.
pub fn app_router(
    state: AppState,
    access_token: &str,
    cache_ttl_seconds: u64,
) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, access_token, cache_ttl_seconds))
}
