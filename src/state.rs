//! Shared application state injected into handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::application::services::LeaderboardService;
use crate::infrastructure::store::CacheStore;
use crate::infrastructure::upstream::SocialApi;

#[derive(Clone)]
pub struct AppState {
    pub leaderboard_service: Arc<LeaderboardService>,
    pub store: Arc<dyn CacheStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(api: Arc<dyn SocialApi>, store: Arc<dyn CacheStore>) -> Self {
        Self {
            leaderboard_service: Arc::new(LeaderboardService::new(api, store.clone())),
            store,
            started_at: Instant::now(),
        }
    }
}
