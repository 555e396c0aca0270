//! Cache store for memoized responses and the post count leaderboard.
//!
//! Provides a [`CacheStore`] trait with two implementations:
//! - [`RedisStore`] - Production Redis-backed store
//! - [`NullStore`] - Permanently disabled store used when Redis is unreachable
//!
//! Both report liveness through a shared [`StoreStatus`].

mod null_store;
mod redis_store;
mod service;

pub use null_store::NullStore;
pub use redis_store::{ConnectOptions, RedisStore};
pub use service::{CacheStore, StoreError, StoreResult, StoreStatus};

#[cfg(test)]
pub use service::MockCacheStore;
