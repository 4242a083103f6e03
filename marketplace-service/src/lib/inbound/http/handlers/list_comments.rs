use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::create_comment::CommentData;
use super::ApiError;
use super::ApiSuccess;
use crate::comment::ports::CommentServicePort;
use crate::inbound::http::router::AppState;
use crate::user::models::UserId;

/// List the comments left on a user's profile, newest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<Vec<CommentData>>, ApiError> {
    let subject_user_id =
        UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .comment_service
        .list_for_user(&subject_user_id)
        .await
        .map_err(ApiError::from)
        .map(|comments| {
            ApiSuccess::new(
                StatusCode::OK,
                comments.iter().map(CommentData::from).collect(),
            )
        })
}
