//! Authentication core library
//!
//! Provides the stateless authentication building blocks for the
//! marketplace service:
//! - Password hashing (Argon2id)
//! - Signed, time-limited bearer tokens (HS256 JWT)
//!
//! The library owns no I/O: credential lookup and identity resolution are
//! the calling service's responsibility. Both halves are safe to share
//! across request-handling tasks; the signing secret is fixed at
//! construction and never mutated afterwards. Tokens are never persisted
//! server-side, so issued tokens cannot be revoked before expiry.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::JwtHandler;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue("user123").unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
