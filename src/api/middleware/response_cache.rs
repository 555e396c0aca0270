//! Response memoization middleware.
//!
//! Wraps a handler so its JSON output is stored under a per-credential cache
//! key and replayed on later requests until the entry expires.

use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};

use crate::infrastructure::store::CacheStore;
use crate::utils::fingerprint::cache_key;

/// Header telling clients whether the body came from the cache.
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Cache settings for one wrapped route.
#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
    key: String,
    ttl_seconds: u64,
}

impl ResponseCache {
    /// Creates cache settings for the route identified by `logical_key`.
    ///
    /// The stored key is namespaced with the fingerprint of `access_token`, so
    /// responses fetched with different credentials never collide.
    pub fn new(
        store: Arc<dyn CacheStore>,
        logical_key: &str,
        access_token: &str,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            store,
            key: cache_key(logical_key, access_token),
            ttl_seconds,
        }
    }

    /// The full cache key, including the credential fingerprint.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns a cached payload if one exists and is valid JSON.
    async fn lookup(&self) -> Option<String> {
        if !self.store.is_enabled() {
            return None;
        }

        match self.store.get(&self.key).await {
            Ok(Some(payload)) => {
                if serde_json::from_str::<serde_json::Value>(&payload).is_ok() {
                    Some(payload)
                } else {
                    warn!("Discarding undecodable cache entry {}", self.key);
                    None
                }
            }
            Ok(None) => None,
            Err(e) => {
                error!("Cache error for {}: {}", self.key, e);
                None
            }
        }
    }

    /// Schedules the handler's JSON body for storage and forwards it unchanged.
    async fn capture(&self, response: Response) -> Response {
        if !response.status().is_success() || !is_json(response.headers()) {
            return response;
        }

        let (mut parts, body) = response.into_parts();
        let bytes = match to_bytes(body, usize::MAX).await {
            Ok(bytes) => bytes,
            Err(e) => {
                // The handler's stream broke mid-body; nothing is left to cache or replay.
                error!("Failed to buffer response for {}: {}", self.key, e);
                parts.headers.remove(header::CONTENT_LENGTH);
                parts
                    .headers
                    .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("MISS"));
                return Response::from_parts(parts, Body::empty());
            }
        };

        if self.store.is_enabled() {
            match std::str::from_utf8(&bytes) {
                Ok(payload) => self.spawn_write(payload.to_owned()),
                Err(_) => warn!("Response for {} is not UTF-8, not cached", self.key),
            }
        }

        parts
            .headers
            .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("MISS"));
        Response::from_parts(parts, Body::from(bytes))
    }

    /// Writes the payload in a detached task; failures are only logged.
    fn spawn_write(&self, payload: String) {
        let store = self.store.clone();
        let key = self.key.clone();
        let ttl = self.ttl_seconds;

        tokio::spawn(async move {
            match store.set_ex(&key, &payload, ttl).await {
                Ok(()) => debug!("Cached response {} for {}s", key, ttl),
                Err(e) => error!("Failed to cache response {}: {}", key, e),
            }
        });
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

fn cached_response(payload: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::HeaderName::from_static(CACHE_STATUS_HEADER), "HIT"),
        ],
        payload,
    )
        .into_response()
}

/// Serves the route from cache, or runs it and caches its JSON output.
///
/// On a hit the wrapped handler is not invoked. Store faults of any kind fall
/// through to the handler; they never turn into an error response.
///
/// # Example
///
/// ```rust,ignore
/// let cache = ResponseCache::new(store, "top_users", &config.access_token, 60);
/// let routes = Router::new()
///     .route("/users", get(top_users_handler))
///     .route_layer(middleware::from_fn_with_state(cache, response_cache::layer));
/// ```
pub async fn layer(State(cache): State<ResponseCache>, req: Request, next: Next) -> Response {
    if let Some(payload) = cache.lookup().await {
        debug!("Serving {} from cache", cache.key());
        return cached_response(payload);
    }

    let response = next.run(req).await;
    cache.capture(response).await
}
