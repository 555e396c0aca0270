//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`store`] - Redis-backed cache store and its disabled fallback
//! - [`upstream`] - HTTP client for the remote social media API

pub mod store;
pub mod upstream;
