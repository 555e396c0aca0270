//! Application layer orchestrating the upstream API and the cache store.
//!
//! - [`services`] - Leaderboard computation and retrieval

pub mod services;
