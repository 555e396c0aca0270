//! Cache store trait, error types and the shared liveness flag.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend is unreachable. The store is disabled after this.
    #[error("Store connection error: {0}")]
    ConnectionError(String),
    /// A single command failed; the connection is still considered usable.
    #[error("Store operation error: {0}")]
    OperationError(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Process-wide liveness flag shared by a store and everything reporting on it.
///
/// The transition is one-way: once disabled, a status never becomes enabled again.
#[derive(Debug, Clone)]
pub struct StoreStatus(Arc<AtomicBool>);

impl StoreStatus {
    /// A status that starts out enabled.
    pub fn enabled() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// A status that is disabled from the start.
    pub fn disabled() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Marks the store disabled.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn disable(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl Default for StoreStatus {
    fn default() -> Self {
        Self::enabled()
    }
}

/// Key/value and sorted-set store used for response caching and the leaderboard.
///
/// Implementations must never block functionality on the backend being present:
/// once [`CacheStore::is_enabled`] reports `false`, reads return absent/empty and
/// writes succeed without doing anything.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed store
/// - [`crate::infrastructure::store::NullStore`] - Permanently disabled store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Reads a string value.
    ///
    /// Returns `Ok(None)` on a miss or when the store is disabled.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes a string value that expires after `ttl_seconds`.
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> StoreResult<()>;

    /// Adds or re-scores a single sorted-set member.
    async fn zadd(&self, set: &str, score: f64, member: &str) -> StoreResult<()>;

    /// Adds or re-scores many sorted-set members in one pipelined round trip.
    async fn zadd_batch(&self, set: &str, entries: &[(String, f64)]) -> StoreResult<()>;

    /// Returns members of `set` between ranks `start` and `stop` (inclusive),
    /// highest score first, together with their scores.
    async fn zrevrange_with_scores(
        &self,
        set: &str,
        start: isize,
        stop: isize,
    ) -> StoreResult<Vec<(String, f64)>>;

    /// Whether the backend is still considered reachable.
    fn is_enabled(&self) -> bool;

    /// Releases the backend connection. Subsequent operations are no-ops.
    async fn close(&self) -> StoreResult<()>;
}
