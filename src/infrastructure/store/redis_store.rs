//! Redis-backed store implementation.

use super::service::{CacheStore, StoreError, StoreResult, StoreStatus};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use std::time::Duration;
use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

/// Connection parameters for [`RedisStore::connect`].
#[derive(Debug, Clone, Copy)]
pub struct ConnectOptions {
    /// Upper bound for a single connection attempt.
    pub connect_timeout: Duration,
    /// Additional attempts after the first one fails.
    pub retries: usize,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            retries: 3,
        }
    }
}

/// Redis store for cached responses and the post count leaderboard.
///
/// Uses `ConnectionManager` for connection reuse. Connection-level failures
/// flip the shared [`StoreStatus`] to disabled and every later call becomes a
/// no-op; command-level failures are reported to the caller but leave the
/// store enabled.
///
/// Commands hold a read guard on the connection for their whole round trip.
/// [`CacheStore::close`] takes the write side, so it drops the connection
/// only after in-flight commands have finished.
pub struct RedisStore {
    connection: RwLock<Option<ConnectionManager>>,
    status: StoreStatus,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// Each attempt is bounded by `options.connect_timeout`; failed attempts are
    /// retried with jittered exponential backoff up to `options.retries` times.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConnectionError`] if the URL is invalid or every
    /// attempt fails.
    pub async fn connect(
        redis_url: &str,
        options: ConnectOptions,
        status: StoreStatus,
    ) -> StoreResult<Self> {
        info!("Connecting to Redis at {}", crate::config::mask_connection_string(redis_url));

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let strategy = ExponentialBackoff::from_millis(2)
            .factor(100)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(options.retries);

        let manager = Retry::start(strategy, || {
            let client = client.clone();
            async move {
                let attempt = async {
                    let mut manager = ConnectionManager::new(client).await?;
                    manager.ping::<()>().await?;
                    Ok::<_, RedisError>(manager)
                };

                match tokio::time::timeout(options.connect_timeout, attempt).await {
                    Ok(Ok(manager)) => Ok(manager),
                    Ok(Err(e)) => {
                        warn!("Redis connection attempt failed: {}", e);
                        Err(StoreError::ConnectionError(e.to_string()))
                    }
                    Err(_) => {
                        warn!(
                            "Redis connection attempt timed out after {:?}",
                            options.connect_timeout
                        );
                        Err(StoreError::ConnectionError("connect timed out".to_string()))
                    }
                }
            }
        })
        .await?;

        info!("✓ Connected to Redis");

        Ok(Self {
            connection: RwLock::new(Some(manager)),
            status,
        })
    }

    /// The liveness flag this store reports through.
    pub fn status(&self) -> StoreStatus {
        self.status.clone()
    }

    /// The live connection, or `None` once the store is disabled or closed.
    async fn session(&self) -> Option<RwLockReadGuard<'_, ConnectionManager>> {
        if !self.status.is_enabled() {
            return None;
        }
        RwLockReadGuard::try_map(self.connection.read().await, Option::as_ref).ok()
    }

    /// Converts a Redis error, disabling the store on connection-level failures.
    fn fail(&self, op: &str, key: &str, e: RedisError) -> StoreError {
        if is_connection_error(&e) {
            if self.status.disable() {
                error!("Redis connection lost during {} {}: {}. Caching disabled.", op, key, e);
            }
            StoreError::ConnectionError(e.to_string())
        } else {
            warn!("Redis {} error for {}: {}", op, key, e);
            StoreError::OperationError(e.to_string())
        }
    }
}

/// Whether an error means the backend itself is unreachable.
pub(crate) fn is_connection_error(e: &RedisError) -> bool {
    e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout()
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let Some(session) = self.session().await else {
            return Ok(None);
        };
        let mut conn = ConnectionManager::clone(&session);

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!("Cache HIT: {}", key);
                Ok(Some(value))
            }
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
            Err(e) => Err(self.fail("GET", key, e)),
        }
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> StoreResult<()> {
        let Some(session) = self.session().await else {
            return Ok(());
        };
        let mut conn = ConnectionManager::clone(&session);

        conn.set_ex::<_, _, ()>(key, value, ttl_seconds)
            .await
            .map_err(|e| self.fail("SETEX", key, e))?;

        debug!("Cache SET: {} (TTL: {}s)", key, ttl_seconds);
        Ok(())
    }

    async fn zadd(&self, set: &str, score: f64, member: &str) -> StoreResult<()> {
        let Some(session) = self.session().await else {
            return Ok(());
        };
        let mut conn = ConnectionManager::clone(&session);

        conn.zadd::<_, _, _, ()>(set, member, score)
            .await
            .map_err(|e| self.fail("ZADD", set, e))
    }

    async fn zadd_batch(&self, set: &str, entries: &[(String, f64)]) -> StoreResult<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let Some(session) = self.session().await else {
            return Ok(());
        };

        let mut pipe = redis::pipe();
        pipe.atomic();
        for (member, score) in entries {
            pipe.zadd(set, member, *score).ignore();
        }

        let mut conn = ConnectionManager::clone(&session);
        pipe.query_async::<()>(&mut conn)
            .await
            .map_err(|e| self.fail("ZADD (pipeline)", set, e))?;

        debug!("Sorted set {} updated with {} members", set, entries.len());
        Ok(())
    }

    async fn zrevrange_with_scores(
        &self,
        set: &str,
        start: isize,
        stop: isize,
    ) -> StoreResult<Vec<(String, f64)>> {
        let Some(session) = self.session().await else {
            return Ok(Vec::new());
        };
        let mut conn = ConnectionManager::clone(&session);

        conn.zrevrange_withscores::<_, Vec<(String, f64)>>(set, start, stop)
            .await
            .map_err(|e| self.fail("ZREVRANGE", set, e))
    }

    fn is_enabled(&self) -> bool {
        self.status.is_enabled()
    }

    async fn close(&self) -> StoreResult<()> {
        self.status.disable();

        match self.connection.write().await.take() {
            Some(manager) => {
                drop(manager);
                info!("Redis connection closed");
            }
            None => debug!("Redis connection already closed"),
        }
        Ok(())
    }
}
