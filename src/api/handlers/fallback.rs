//! Handler for unknown routes.

use axum::http::Uri;
use serde_json::json;

use crate::error::AppError;

/// Returns a JSON 404 for any unmatched route.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Route not found", json!({ "path": uri.path() }))
}
