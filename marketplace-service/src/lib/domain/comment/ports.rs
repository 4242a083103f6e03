use async_trait::async_trait;

use crate::comment::errors::CommentError;
use crate::comment::models::Comment;
use crate::comment::models::CreateCommentCommand;
use crate::user::models::UserId;

/// Port for comment domain service operations.
#[async_trait]
pub trait CommentServicePort: Send + Sync + 'static {
    /// Leave a comment and rating on a user.
    ///
    /// # Errors
    /// * `SubjectUserNotFound` - Commented user does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_comment(&self, command: CreateCommentCommand)
        -> Result<Comment, CommentError>;

    /// Retrieve all comments left on a user, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_for_user(&self, subject_user_id: &UserId)
        -> Result<Vec<Comment>, CommentError>;
}

/// Persistence operations for comments.
#[async_trait]
pub trait CommentRepository: Send + Sync + 'static {
    /// Persist new comment to storage.
    ///
    /// # Errors
    /// * `SubjectUserNotFound` - Commented user does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, comment: Comment) -> Result<Comment, CommentError>;

    /// Retrieve comments on a user, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_for_user(&self, subject_user_id: &UserId)
        -> Result<Vec<Comment>, CommentError>;
}
