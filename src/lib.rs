//! # Social Leaderboard
//!
//! A small HTTP service ranking users of a remote social media API by post
//! count, with responses and the leaderboard cached in Redis.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Users, posts and leaderboard entries
//! - **Application Layer** ([`application`]) - Leaderboard refresh and retrieval
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis store and upstream HTTP client
//! - **API Layer** ([`api`]) - Handlers, DTOs and middleware (response cache, tracing)
//!
//! ## Degradation
//!
//! Redis is optional at runtime. If it cannot be reached at startup, or the
//! connection is lost later, the store switches to a disabled state for the
//! rest of the process lifetime and every request is computed fresh from the
//! upstream API. Upstream failures degrade to empty results.
//!
//! ## Quick Start
//!
//! ```bash
//! export SOCIAL_MEDIA_API_BASE_URL="http://localhost:9000"
//! export ACCESS_TOKEN="..."
//! export REDIS_HOST="localhost"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LEADERBOARD_KEY, LeaderboardService};
    pub use crate::domain::entities::{LeaderboardEntry, Post, User};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{CacheStore, NullStore, StoreResult, StoreStatus};
    pub use crate::infrastructure::upstream::SocialApi;
    pub use crate::state::AppState;
}
