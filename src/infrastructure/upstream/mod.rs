//! Client for the remote social media API.
//!
//! Provides a [`SocialApi`] trait and its HTTP implementation [`HttpSocialApi`].
//! Every failure is normalized to an empty result at this boundary.

mod http_client;
mod service;

pub use http_client::HttpSocialApi;
pub use service::{SocialApi, UpstreamError};

#[cfg(test)]
pub use service::MockSocialApi;
