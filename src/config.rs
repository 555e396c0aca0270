//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! - `SOCIAL_MEDIA_API_BASE_URL` - Base URL of the upstream social media API
//! - `ACCESS_TOKEN` - Bearer token sent with every upstream request
//!
//! ## Redis
//!
//! ### Method 1: Full URL
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! ```
//!
//! ### Method 2: Individual components
//!
//! ```bash
//! export REDIS_HOST="localhost"      # default: localhost
//! export REDIS_PORT="6379"           # default: 6379
//! export REDIS_PASSWORD=""           # default: none
//! export REDIS_DB="0"                # default: 0
//! ```
//!
//! If Redis cannot be reached at startup the service runs with caching disabled.
//!
//! ## Optional Variables
//!
//! - `SERVER_PORT` - Listen port (default: `3000`)
//! - `CACHE_TTL_SECONDS` - Lifetime of cached responses (default: `60`)
//! - `UPSTREAM_TIMEOUT_SECONDS` - Per-request upstream timeout (default: `10`)
//! - `REDIS_CONNECT_TIMEOUT_SECONDS` - Per-attempt Redis connect timeout (default: `5`)
//! - `REDIS_CONNECT_RETRIES` - Redis connect retries after the first attempt (default: `3`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::store::ConnectOptions;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub social_api_base_url: String,
    pub access_token: String,
    pub redis_url: String,
    pub server_port: u16,
    pub log_level: String,
    pub log_format: String,
    /// Lifetime (seconds) of memoized responses.
    pub cache_ttl_seconds: u64,
    /// Upstream requests are abandoned after this many seconds.
    pub upstream_timeout_seconds: u64,
    pub redis_connect_timeout_seconds: u64,
    pub redis_connect_retries: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SOCIAL_MEDIA_API_BASE_URL` or `ACCESS_TOKEN` is missing.
    pub fn from_env() -> Result<Self> {
        let social_api_base_url = env::var("SOCIAL_MEDIA_API_BASE_URL")
            .context("SOCIAL_MEDIA_API_BASE_URL must be set")?;
        let access_token = env::var("ACCESS_TOKEN").context("ACCESS_TOKEN must be set")?;

        let redis_url = Self::load_redis_url()?;

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            social_api_base_url,
            access_token,
            redis_url,
            server_port: parse_or("SERVER_PORT", 3000),
            log_level,
            log_format,
            cache_ttl_seconds: parse_or("CACHE_TTL_SECONDS", 60),
            upstream_timeout_seconds: parse_or("UPSTREAM_TIMEOUT_SECONDS", 10),
            redis_connect_timeout_seconds: parse_or("REDIS_CONNECT_TIMEOUT_SECONDS", 5),
            redis_connect_retries: parse_or("REDIS_CONNECT_RETRIES", 3),
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// The password is percent-encoded, so it may contain URL delimiters.
    fn load_redis_url() -> Result<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Ok(url);
        }

        let host = env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let mut url = url::Url::parse(&format!("redis://{}:{}/{}", host, port, db))
            .with_context(|| {
                format!("Invalid REDIS_HOST/REDIS_PORT/REDIS_DB: '{}:{}/{}'", host, port, db)
            })?;

        match env::var("REDIS_PASSWORD") {
            // Empty password means no authentication
            Ok(pwd) if !pwd.is_empty() => {
                // The userinfo encode set leaves '%' alone, but Redis decodes it
                url.set_password(Some(&pwd.replace('%', "%25")))
                    .map_err(|()| anyhow::anyhow!("REDIS_HOST '{}' cannot carry a password", host))?;
            }
            _ => {}
        }

        Ok(url.into())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the upstream base URL is not an http(s) URL
    /// - the access token is empty
    /// - the Redis URL does not parse or has an unknown scheme
    /// - `log_format` is not `text` or `json`
    /// - the cache TTL or upstream timeout is zero
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.social_api_base_url).with_context(|| {
            format!(
                "SOCIAL_MEDIA_API_BASE_URL is not a valid URL: '{}'",
                self.social_api_base_url
            )
        })?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!(
                "SOCIAL_MEDIA_API_BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.social_api_base_url
            );
        }

        if self.access_token.trim().is_empty() {
            anyhow::bail!("ACCESS_TOKEN must not be empty");
        }

        let redis = url::Url::parse(&self.redis_url).with_context(|| {
            format!(
                "REDIS_URL is not a valid URL: '{}'",
                mask_connection_string(&self.redis_url)
            )
        })?;
        if redis.scheme() != "redis" && redis.scheme() != "rediss" {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(&self.redis_url)
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.cache_ttl_seconds == 0 {
            anyhow::bail!("CACHE_TTL_SECONDS must be greater than 0");
        }

        if self.upstream_timeout_seconds == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.redis_connect_timeout_seconds == 0 {
            anyhow::bail!("REDIS_CONNECT_TIMEOUT_SECONDS must be greater than 0");
        }

        Ok(())
    }

    /// Address the HTTP server binds to.
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.server_port)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }

    pub fn redis_connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            connect_timeout: Duration::from_secs(self.redis_connect_timeout_seconds),
            retries: self.redis_connect_retries,
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr());
        tracing::info!("  Upstream API: {}", self.social_api_base_url);
        tracing::info!(
            "  Access token: ***{}",
            crate::utils::fingerprint::credential_fingerprint(&self.access_token)
        );
        tracing::info!("  Redis: {}", mask_connection_string(&self.redis_url));
        tracing::info!("  Cache TTL: {}s", self.cache_ttl_seconds);
        tracing::info!("  Upstream timeout: {}s", self.upstream_timeout_seconds);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads and parses an optional variable, falling back to `default` when unset or invalid.
fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Masks sensitive information in connection strings for logging.
///
/// Replaces password with `***` in URLs like:
/// - `redis://:password@host:port/db` → `redis://:***@host:port/db`
pub(crate) fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
