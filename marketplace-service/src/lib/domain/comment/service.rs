use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::comment::errors::CommentError;
use crate::comment::models::Comment;
use crate::comment::models::CommentId;
use crate::comment::models::CreateCommentCommand;
use crate::comment::ports::CommentRepository;
use crate::comment::ports::CommentServicePort;
use crate::user::models::UserId;

/// Domain service implementation for comment operations.
pub struct CommentService<CR>
where
    CR: CommentRepository,
{
    repository: Arc<CR>,
}

impl<CR> CommentService<CR>
where
    CR: CommentRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> CommentServicePort for CommentService<CR>
where
    CR: CommentRepository,
{
    async fn create_comment(
        &self,
        command: CreateCommentCommand,
    ) -> Result<Comment, CommentError> {
        let comment = Comment {
            id: CommentId::new(),
            subject_user_id: command.subject_user_id,
            author_name: command.author_name,
            author_email: command.author_email,
            body: command.body,
            rating: command.rating,
            created_at: Utc::now(),
        };

        self.repository.create(comment).await
    }

    async fn list_for_user(
        &self,
        subject_user_id: &UserId,
    ) -> Result<Vec<Comment>, CommentError> {
        self.repository.list_for_user(subject_user_id).await
    }
}
