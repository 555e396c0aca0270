//! Handler for the top users leaderboard.

use axum::{Json, extract::State};
use tracing::error;

use crate::api::dto::top_users::TopUserResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the five users with the most posts.
///
/// # Endpoint
///
/// `GET /users`
///
/// # Request Flow
///
/// 1. Read the top of the `user_post_counts` sorted set
/// 2. On an empty read, refresh the leaderboard from upstream and read again
/// 3. Resolve display names from the upstream user list (`"Unknown"` if absent)
///
/// The route is wrapped by the response cache, so within one TTL window this
/// handler runs at most once per credential.
///
/// # Response
///
/// ```json
/// [
///   { "user_id": "1", "name": "Alice", "post_count": 3 },
///   { "user_id": "2", "name": "Bob", "post_count": 1 }
/// ]
/// ```
///
/// # Errors
///
/// Returns 500 Internal Server Error if the stored leaderboard is corrupt.
pub async fn top_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TopUserResponse>>, AppError> {
    let entries = state
        .leaderboard_service
        .top_users()
        .await
        .inspect_err(|e| error!("Failed to build top users: {:?}", e))?;

    Ok(Json(entries.into_iter().map(TopUserResponse::from).collect()))
}
