use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::comment::errors::CommentError;
use crate::comment::models::Comment;
use crate::comment::models::CommentId;
use crate::comment::models::Rating;
use crate::comment::ports::CommentRepository;
use crate::user::models::EmailAddress;
use crate::user::models::UserId;

pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    subject_user_id: Uuid,
    author_name: String,
    author_email: String,
    body: String,
    rating: i16,
    created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = CommentError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: CommentId(row.id),
            subject_user_id: UserId(row.subject_user_id),
            author_name: row.author_name,
            author_email: EmailAddress::new(row.author_email)?,
            body: row.body,
            rating: Rating::new(row.rating)?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, comment: Comment) -> Result<Comment, CommentError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, subject_user_id, author_name, author_email, body,
                                  rating, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(comment.id.0)
        .bind(comment.subject_user_id.0)
        .bind(&comment.author_name)
        .bind(comment.author_email.as_str())
        .bind(&comment.body)
        .bind(comment.rating.value())
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                // Commenting on a user that does not exist
                if db_err.is_foreign_key_violation() {
                    return CommentError::SubjectUserNotFound(
                        comment.subject_user_id.to_string(),
                    );
                }
            }
            CommentError::DatabaseError(e.to_string())
        })?;

        Ok(comment)
    }

    async fn list_for_user(
        &self,
        subject_user_id: &UserId,
    ) -> Result<Vec<Comment>, CommentError> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            r#"
            SELECT id, subject_user_id, author_name, author_email, body, rating, created_at
            FROM comments
            WHERE subject_user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(subject_user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CommentError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Comment::try_from).collect()
    }
}
