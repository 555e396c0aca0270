//! HTTP request handlers for API endpoints.

pub mod fallback;
pub mod health;
pub mod top_users;

pub use fallback::not_found_handler;
pub use health::health_handler;
pub use top_users::top_users_handler;
