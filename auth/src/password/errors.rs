use thiserror::Error;

/// Error type for password operations.
///
/// Only hashing can fail. Verification against a malformed or foreign
/// digest is an ordinary mismatch, not an error.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
