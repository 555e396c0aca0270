//! Domain layer containing the data model shared by services and handlers.
//!
//! # Architecture
//!
//! - [`entities`] - Users, posts and leaderboard entries
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.

pub mod entities;
