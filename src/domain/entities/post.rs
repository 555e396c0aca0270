//! Post entity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single post returned by `GET /users/{id}/posts`.
///
/// The service only counts posts, so the payload is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Post(pub Value);
