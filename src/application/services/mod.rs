//! Business logic services for the application layer.

pub mod leaderboard_service;

pub use leaderboard_service::{LEADERBOARD_KEY, LeaderboardService, RefreshOutcome, TOP_USERS_LIMIT};
