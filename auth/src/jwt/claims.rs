use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Bearer token payload.
///
/// Standard RFC 7519 claims: subject, expiry, and issued-at. The
/// subject carries the authenticated user's id; resolving it back to a
/// stored identity is the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a subject expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `subject` - User identifier to encode as `sub`
    /// * `ttl` - Time until the token expires
    pub fn new(subject: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Create claims with explicit timestamps.
    ///
    /// Used where the expiry is computed by the caller, and by tests
    /// that need tokens issued at a simulated time.
    pub fn with_timestamps(subject: impl ToString, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: subject.to_string(),
            exp: expires_at,
            iat: issued_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_computes_expiry_from_ttl() {
        let claims = Claims::new("user123", Duration::minutes(15));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_with_timestamps() {
        let claims = Claims::with_timestamps("user123", 1_000, 2_000);

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.iat, 1_000);
        assert_eq!(claims.exp, 2_000);
    }
}
