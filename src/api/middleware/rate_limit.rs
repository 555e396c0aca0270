//! Rate limiting hook.

use axum::{extract::Request, middleware::Next, response::Response};

/// Pass-through hook marking where per-client rate limiting plugs in.
///
/// Every request is forwarded unchanged.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/users", get(top_users_handler))
///     .layer(middleware::from_fn(rate_limit::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Response {
    next.run(req).await
}
