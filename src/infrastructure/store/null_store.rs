//! Store implementation used when Redis is unavailable.

use super::service::{CacheStore, StoreResult, StoreStatus};
use async_trait::async_trait;
use tracing::debug;

/// A store that is permanently disabled.
///
/// Used when the Redis connection cannot be established at startup, so the
/// service runs without any caching. All reads are absent, all writes succeed
/// without storing anything.
pub struct NullStore {
    status: StoreStatus,
}

impl NullStore {
    /// Creates a new NullStore instance.
    pub fn new() -> Self {
        debug!("Using NullStore (caching disabled)");
        Self {
            status: StoreStatus::disabled(),
        }
    }

    /// The (always disabled) status of this store.
    pub fn status(&self) -> StoreStatus {
        self.status.clone()
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for NullStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }

    async fn set_ex(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> StoreResult<()> {
        Ok(())
    }

    async fn zadd(&self, _set: &str, _score: f64, _member: &str) -> StoreResult<()> {
        Ok(())
    }

    async fn zadd_batch(&self, _set: &str, _entries: &[(String, f64)]) -> StoreResult<()> {
        Ok(())
    }

    async fn zrevrange_with_scores(
        &self,
        _set: &str,
        _start: isize,
        _stop: isize,
    ) -> StoreResult<Vec<(String, f64)>> {
        Ok(Vec::new())
    }

    fn is_enabled(&self) -> bool {
        self.status.is_enabled()
    }

    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}
