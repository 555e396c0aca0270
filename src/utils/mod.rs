//! Helper functions used across the application:
//!
//! - [`fingerprint`] - Credential fingerprints and per-credential cache keys
//! - [`process`] - Process metrics for health reporting

pub mod fingerprint;
pub mod process;
