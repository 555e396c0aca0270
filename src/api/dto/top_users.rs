//! DTOs for the top users endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::LeaderboardEntry;

/// One ranked user in the `GET /users` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopUserResponse {
    pub user_id: String,
    pub name: String,
    pub post_count: u64,
}

impl From<LeaderboardEntry> for TopUserResponse {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            user_id: entry.user_id,
            name: entry.name,
            post_count: entry.post_count,
        }
    }
}
