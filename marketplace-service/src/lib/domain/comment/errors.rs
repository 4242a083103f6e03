use thiserror::Error;

use crate::user::errors::EmailError;

/// Error for CommentId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Rating validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating must be between {min} and {max}, got {actual}")]
    OutOfRange { min: i16, max: i16, actual: i16 },
}

/// Top-level error for comment operations
#[derive(Debug, Clone, Error)]
pub enum CommentError {
    #[error("Invalid comment ID: {0}")]
    InvalidCommentId(#[from] CommentIdError),

    #[error("Invalid rating: {0}")]
    InvalidRating(#[from] RatingError),

    #[error("Invalid author email: {0}")]
    InvalidAuthorEmail(#[from] EmailError),

    #[error("Commented user not found: {0}")]
    SubjectUserNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
