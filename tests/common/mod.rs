#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use social_leaderboard::domain::entities::Post;
use social_leaderboard::infrastructure::store::{CacheStore, StoreResult, StoreStatus};
use social_leaderboard::infrastructure::upstream::SocialApi;
use social_leaderboard::routes::router;
use social_leaderboard::state::AppState;

pub const TOKEN: &str = "integration-token-aaaaaa";
pub const OTHER_TOKEN: &str = "integration-token-bbbbbb";
pub const TTL: u64 = 60;

/// In-memory stand-in for Redis with TTL-expiring values and sorted sets.
pub struct MemoryStore {
    status: StoreStatus,
    values: Mutex<HashMap<String, (String, Instant)>>,
    sets: Mutex<HashMap<String, HashMap<String, f64>>>,
    pub set_ex_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_status(StoreStatus::enabled())
    }

    pub fn with_status(status: StoreStatus) -> Self {
        Self {
            status,
            values: Mutex::new(HashMap::new()),
            sets: Mutex::new(HashMap::new()),
            set_ex_calls: AtomicUsize::new(0),
        }
    }

    pub fn status(&self) -> StoreStatus {
        self.status.clone()
    }

    pub fn value(&self, key: &str) -> Option<String> {
        let values = self.values.lock().unwrap();
        values
            .get(key)
            .filter(|(_, expires_at)| Instant::now() < *expires_at)
            .map(|(value, _)| value.clone())
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn score(&self, set: &str, member: &str) -> Option<f64> {
        self.sets
            .lock()
            .unwrap()
            .get(set)
            .and_then(|members| members.get(member).copied())
    }

    pub fn set_len(&self, set: &str) -> usize {
        self.sets.lock().unwrap().get(set).map_or(0, HashMap::len)
    }

    /// Waits for the detached cache write of `key` to land.
    pub async fn wait_for_key(&self, key: &str) -> String {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(value) = self.value(key) {
                return value;
            }
            assert!(Instant::now() < deadline, "cache key {} was never written", key);
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        if !self.status.is_enabled() {
            return Ok(None);
        }
        Ok(self.value(key))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> StoreResult<()> {
        if !self.status.is_enabled() {
            return Ok(());
        }
        self.set_ex_calls.fetch_add(1, Ordering::SeqCst);
        let expires_at = Instant::now() + Duration::from_secs(ttl_seconds);
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }

    async fn zadd(&self, set: &str, score: f64, member: &str) -> StoreResult<()> {
        if !self.status.is_enabled() {
            return Ok(());
        }
        self.sets
            .lock()
            .unwrap()
            .entry(set.to_string())
            .or_default()
            .insert(member.to_string(), score);
        Ok(())
    }

    async fn zadd_batch(&self, set: &str, entries: &[(String, f64)]) -> StoreResult<()> {
        for (member, score) in entries {
            self.zadd(set, *score, member).await?;
        }
        Ok(())
    }

    async fn zrevrange_with_scores(
        &self,
        set: &str,
        start: isize,
        stop: isize,
    ) -> StoreResult<Vec<(String, f64)>> {
        if !self.status.is_enabled() {
            return Ok(Vec::new());
        }
        let sets = self.sets.lock().unwrap();
        let Some(members) = sets.get(set) else {
            return Ok(Vec::new());
        };

        let mut ranked: Vec<(String, f64)> =
            members.iter().map(|(m, s)| (m.clone(), *s)).collect();
        // Redis orders equal scores in reverse lexicographic order
        ranked.sort_by(|(a_m, a_s), (b_m, b_s)| b_s.total_cmp(a_s).then_with(|| b_m.cmp(a_m)));

        let len = ranked.len() as isize;
        let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
        if start > stop {
            return Ok(Vec::new());
        }
        Ok(ranked[start as usize..=stop as usize].to_vec())
    }

    fn is_enabled(&self) -> bool {
        self.status.is_enabled()
    }

    async fn close(&self) -> StoreResult<()> {
        self.status.disable();
        Ok(())
    }
}

/// Upstream API stub with per-endpoint call counters.
pub struct StubSocialApi {
    users: Mutex<HashMap<String, String>>,
    post_counts: Mutex<HashMap<String, usize>>,
    users_unavailable: AtomicBool,
    pub user_calls: AtomicUsize,
    pub post_calls: AtomicUsize,
}

impl StubSocialApi {
    pub fn new(users: &[(&str, &str, usize)]) -> Self {
        Self {
            users: Mutex::new(
                users
                    .iter()
                    .map(|(id, name, _)| (id.to_string(), name.to_string()))
                    .collect(),
            ),
            post_counts: Mutex::new(
                users
                    .iter()
                    .map(|(id, _, count)| (id.to_string(), *count))
                    .collect(),
            ),
            users_unavailable: AtomicBool::new(false),
            user_calls: AtomicUsize::new(0),
            post_calls: AtomicUsize::new(0),
        }
    }

    pub fn alice_and_bob() -> Self {
        Self::new(&[("1", "Alice", 3), ("2", "Bob", 1)])
    }

    /// Makes `/users` fail, as the real client reports it: an empty mapping.
    pub fn fail_users(&self) {
        self.users_unavailable.store(true, Ordering::SeqCst);
    }

    pub fn user_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }

    pub fn post_calls(&self) -> usize {
        self.post_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SocialApi for StubSocialApi {
    async fn fetch_all_users(&self) -> HashMap<String, String> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        if self.users_unavailable.load(Ordering::SeqCst) {
            return HashMap::new();
        }
        self.users.lock().unwrap().clone()
    }

    async fn fetch_user_posts(&self, user_id: &str) -> Vec<Post> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        let count = self
            .post_counts
            .lock()
            .unwrap()
            .get(user_id)
            .copied()
            .unwrap_or(0);
        (0..count).map(|i| Post(json!({ "id": i }))).collect()
    }
}

pub fn create_test_state(api: Arc<StubSocialApi>, store: Arc<dyn CacheStore>) -> AppState {
    AppState::new(api, store)
}

pub fn create_test_server(
    api: Arc<StubSocialApi>,
    store: Arc<dyn CacheStore>,
    token: &str,
) -> TestServer {
    create_test_server_with_ttl(api, store, token, TTL)
}

pub fn create_test_server_with_ttl(
    api: Arc<StubSocialApi>,
    store: Arc<dyn CacheStore>,
    token: &str,
    ttl_seconds: u64,
) -> TestServer {
    let state = create_test_state(api, store);
    TestServer::new(router(state, token, ttl_seconds)).unwrap()
}
