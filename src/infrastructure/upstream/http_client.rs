//! `reqwest`-based implementation of [`SocialApi`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use super::service::{SocialApi, UpstreamError};
use crate::domain::entities::Post;

#[derive(Debug, Deserialize)]
struct UsersResponse {
    #[serde(default)]
    users: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct PostsResponse {
    #[serde(default)]
    posts: Vec<Post>,
}

/// HTTP client for the upstream API.
///
/// Every request carries `Authorization: Bearer <token>` and a JSON content type,
/// and is abandoned after the configured timeout.
#[derive(Debug, Clone)]
pub struct HttpSocialApi {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpSocialApi {
    /// Builds a client for `base_url` authenticated with `access_token`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidUrl`] if `base_url` is not an absolute
    /// http(s) URL, and [`UpstreamError::InvalidCredential`] if the token cannot
    /// be sent as a header.
    pub fn new(base_url: &str, access_token: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(base_url.to_string()));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|_| UpstreamError::InvalidCredential)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, UpstreamError> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);

        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl SocialApi for HttpSocialApi {
    async fn fetch_all_users(&self) -> HashMap<String, String> {
        match self.get_json::<UsersResponse>(&["users"]).await {
            Ok(body) => body.users,
            Err(e) => {
                error!("Error fetching users: {}", e);
                HashMap::new()
            }
        }
    }

    async fn fetch_user_posts(&self, user_id: &str) -> Vec<Post> {
        match self.get_json::<PostsResponse>(&["users", user_id, "posts"]).await {
            Ok(body) => body.posts,
            Err(e) => {
                error!("Error fetching posts for user {}: {}", user_id, e);
                Vec::new()
            }
        }
    }
}
