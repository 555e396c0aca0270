//! Post count leaderboard: refresh from upstream and top-N retrieval.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{LeaderboardEntry, UNKNOWN_USER_NAME, User};
use crate::error::AppError;
use crate::infrastructure::store::CacheStore;
use crate::infrastructure::upstream::SocialApi;

/// Sorted set holding one `user_id -> post count` member per user.
pub const LEADERBOARD_KEY: &str = "user_post_counts";

/// Number of users returned by [`LeaderboardService::top_users`].
pub const TOP_USERS_LIMIT: usize = 5;

/// Result of a single refresh pass.
#[derive(Debug, Clone, Default)]
pub struct RefreshOutcome {
    /// The `id -> name` mapping the pass was computed from.
    pub users: HashMap<String, String>,
    /// Post count per user id, ordered by user id.
    pub counts: Vec<(String, u64)>,
}

impl RefreshOutcome {
    /// The `limit` highest counts, ties broken by user id.
    pub fn top(&self, limit: usize) -> Vec<(String, u64)> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|(a_id, a), (b_id, b)| b.cmp(a).then_with(|| a_id.cmp(b_id)));
        ranked.truncate(limit);
        ranked
    }
}

/// Service computing and serving the post count leaderboard.
///
/// The leaderboard lives in the [`LEADERBOARD_KEY`] sorted set. Refreshes are
/// not serialized: two concurrent cold reads may both refresh, and since every
/// write re-scores the same members the last one simply wins.
pub struct LeaderboardService {
    api: Arc<dyn SocialApi>,
    store: Arc<dyn CacheStore>,
}

impl LeaderboardService {
    /// Creates a new leaderboard service.
    pub fn new(api: Arc<dyn SocialApi>, store: Arc<dyn CacheStore>) -> Self {
        Self { api, store }
    }

    /// Recomputes every user's post count and writes them in one batch.
    ///
    /// Posts are fetched concurrently per user. A user whose posts cannot be
    /// fetched scores 0; if the user list itself is unavailable the refresh is
    /// a no-op. Store failures are logged, never returned.
    pub async fn refresh(&self) -> RefreshOutcome {
        let users = self.api.fetch_all_users().await;
        if users.is_empty() {
            warn!("No users available from upstream, leaderboard refresh skipped");
            return RefreshOutcome::default();
        }

        let counts = join_all(User::from_mapping(&users).into_iter().map(|user| async move {
            let posts = self.api.fetch_user_posts(&user.id).await;
            (user.id, posts.len() as u64)
        }))
        .await;

        let entries: Vec<(String, f64)> = counts
            .iter()
            .map(|(id, count)| (id.clone(), *count as f64))
            .collect();

        if let Err(e) = self.store.zadd_batch(LEADERBOARD_KEY, &entries).await {
            warn!("Failed to store leaderboard: {}", e);
        }

        info!("Leaderboard refreshed for {} users", counts.len());

        RefreshOutcome { users, counts }
    }

    /// Returns the top users by post count, joined with their names.
    ///
    /// Reads the sorted set first. When it is empty (cold start or disabled
    /// store) a refresh runs before re-reading; if the store still has nothing,
    /// the ranking is taken from the refresh itself. Users missing from the
    /// upstream mapping are named [`UNKNOWN_USER_NAME`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the sorted set holds a score that is
    /// not a valid post count.
    pub async fn top_users(&self) -> Result<Vec<LeaderboardEntry>, AppError> {
        let mut ranked = self.read_top().await?;
        let mut refreshed_users = None;

        if ranked.is_empty() {
            debug!("Leaderboard is empty, refreshing");
            let outcome = self.refresh().await;

            ranked = self.read_top().await?;
            if ranked.is_empty() {
                ranked = outcome.top(TOP_USERS_LIMIT);
            }
            refreshed_users = Some(outcome.users);
        }

        let users = match refreshed_users {
            Some(users) => users,
            None => self.api.fetch_all_users().await,
        };

        Ok(ranked
            .into_iter()
            .map(|(user_id, post_count)| {
                let name = users
                    .get(&user_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_USER_NAME.to_string());
                LeaderboardEntry::new(user_id, name, post_count)
            })
            .collect())
    }

    /// Reads the top of the sorted set; empty when the store is unavailable.
    async fn read_top(&self) -> Result<Vec<(String, u64)>, AppError> {
        if !self.store.is_enabled() {
            return Ok(Vec::new());
        }

        let members = match self
            .store
            .zrevrange_with_scores(LEADERBOARD_KEY, 0, TOP_USERS_LIMIT as isize - 1)
            .await
        {
            Ok(members) => members,
            Err(e) => {
                warn!("Failed to read leaderboard: {}", e);
                return Ok(Vec::new());
            }
        };

        members
            .into_iter()
            .map(|(user_id, score)| match LeaderboardEntry::count_from_score(score) {
                Some(count) => Ok((user_id, count)),
                None => Err(AppError::internal(
                    "Internal Server Error",
                    json!({ "reason": format!("invalid post count {} for user {}", score, user_id) }),
                )),
            })
            .collect()
    }
}
