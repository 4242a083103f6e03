use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::comment::errors::CommentError;
use crate::comment::models::Comment;
use crate::comment::models::CreateCommentCommand;
use crate::comment::models::Rating;
use crate::comment::ports::CommentServicePort;
use crate::inbound::http::router::AppState;
use crate::user::models::EmailAddress;
use crate::user::models::UserId;

/// Leave a comment and rating on a user's profile.
///
/// Open to anonymous commenters; they identify themselves in the body.
pub async fn create_comment(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<ApiSuccess<CommentData>, ApiError> {
    let subject_user_id =
        UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let command = body.try_into_command(subject_user_id)?;

    state
        .comment_service
        .create_comment(command)
        .await
        .map_err(ApiError::from)
        .map(|ref comment| ApiSuccess::new(StatusCode::CREATED, comment.into()))
}

/// HTTP request body for leaving a comment (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCommentRequest {
    author_name: String,
    author_email: String,
    body: String,
    rating: i16,
}

impl CreateCommentRequest {
    fn try_into_command(
        self,
        subject_user_id: UserId,
    ) -> Result<CreateCommentCommand, CommentError> {
        let author_email = EmailAddress::new(self.author_email)?;
        let rating = Rating::new(self.rating)?;

        Ok(CreateCommentCommand {
            subject_user_id,
            author_name: self.author_name,
            author_email,
            body: self.body,
            rating,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentData {
    pub id: String,
    pub subject_user_id: String,
    pub author_name: String,
    pub author_email: String,
    pub body: String,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentData {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            subject_user_id: comment.subject_user_id.to_string(),
            author_name: comment.author_name.clone(),
            author_email: comment.author_email.as_str().to_string(),
            body: comment.body.clone(),
            rating: comment.rating.value(),
            created_at: comment.created_at,
        }
    }
}
