//! Core domain entities.
//!
//! - [`User`] - A user known to the upstream social media API
//! - [`Post`] - An opaque post record; only its presence is counted
//! - [`LeaderboardEntry`] - A ranked user with their post count

pub mod leaderboard;
pub mod post;
pub mod user;

pub use leaderboard::{LeaderboardEntry, UNKNOWN_USER_NAME};
pub use post::Post;
pub use user::User;
