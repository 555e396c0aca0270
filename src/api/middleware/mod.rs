//! HTTP middleware for request processing.
//!
//! Provides response caching, the rate limiting hook and request tracing.

pub mod rate_limit;
pub mod response_cache;
pub mod tracing;

pub use response_cache::ResponseCache;
