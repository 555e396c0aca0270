//! Upstream API trait and error types.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::entities::Post;

/// Errors raised while talking to the upstream API.
///
/// These never leave [`SocialApi`] implementations; they are logged and the
/// call degrades to an empty result.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid upstream base URL: {0}")]
    InvalidUrl(String),
    #[error("access token is not a valid header value")]
    InvalidCredential,
}

/// Read-only view of the remote social media API.
///
/// # Implementations
///
/// - [`crate::infrastructure::upstream::HttpSocialApi`] - `reqwest`-based client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// Returns every user as an `id -> name` mapping.
    ///
    /// Returns an empty mapping if the request fails for any reason.
    async fn fetch_all_users(&self) -> HashMap<String, String>;

    /// Returns the posts authored by `user_id`.
    ///
    /// Returns an empty list if the request fails for any reason.
    async fn fetch_user_posts(&self, user_id: &str) -> Vec<Post>;
}
