use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::comment::errors::CommentIdError;
use crate::comment::errors::RatingError;
use crate::user::models::EmailAddress;
use crate::user::models::UserId;

/// A comment left on a service provider's profile, with a rating.
///
/// Commenters are not required to hold an account; they identify
/// themselves with a display name and email.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    /// The user being commented on
    pub subject_user_id: UserId,
    pub author_name: String,
    pub author_email: EmailAddress,
    pub body: String,
    pub rating: Rating,
    pub created_at: DateTime<Utc>,
}

/// Comment unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a comment ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, CommentIdError> {
        Uuid::parse_str(s)
            .map(CommentId)
            .map_err(|e| CommentIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Rating value type, 1 (worst) to 5 (best).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(i16);

impl Rating {
    const MIN: i16 = 1;
    const MAX: i16 = 5;

    /// Create a validated rating.
    ///
    /// # Errors
    /// * `OutOfRange` - Value outside 1..=5
    pub fn new(value: i16) -> Result<Self, RatingError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(RatingError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i16 {
        self.0
    }
}

/// Command to leave a comment on a user.
#[derive(Debug)]
pub struct CreateCommentCommand {
    pub subject_user_id: UserId,
    pub author_name: String,
    pub author_email: EmailAddress,
    pub body: String,
    pub rating: Rating,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
        assert!(matches!(
            Rating::new(0),
            Err(RatingError::OutOfRange { actual: 0, .. })
        ));
        assert!(matches!(
            Rating::new(6),
            Err(RatingError::OutOfRange { actual: 6, .. })
        ));
    }
}
