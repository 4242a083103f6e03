use thiserror::Error;

/// Error type for token operations.
///
/// `TokenExpired` is kept distinct from `InvalidToken` so callers can
/// log or message the two differently; both must still map to the same
/// unauthorized outcome at the transport boundary.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}
