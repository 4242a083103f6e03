use thiserror::Error;

/// Error for ListingId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListingIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for photo storage operations
#[derive(Debug, Clone, Error)]
pub enum PhotoStoreError {
    #[error("Unsupported photo format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to store photo: {0}")]
    WriteFailed(String),
}

/// Top-level error for listing operations
#[derive(Debug, Clone, Error)]
pub enum ListingError {
    #[error("Invalid listing ID: {0}")]
    InvalidListingId(#[from] ListingIdError),

    #[error("Listing not found: {0}")]
    NotFound(String),

    #[error("Listing {0} does not belong to the requesting user")]
    NotOwner(String),

    #[error("Listing price must not be negative, got {0}")]
    InvalidPrice(i64),

    #[error("Photo error: {0}")]
    Photo(#[from] PhotoStoreError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
