use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Default token lifetime when the caller does not override it.
const DEFAULT_TTL_MINUTES: i64 = 15;

/// Issues and verifies signed bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a secret fixed at construction.
/// Issued tokens are stateless: no record of issuance is kept, so a
/// token stays valid until its expiry no matter what happens to the
/// account in between. Verification re-checks the account, revocation
/// before expiry is not possible.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for a subject with the default lifetime (15 minutes).
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str) -> Result<String, JwtError> {
        self.issue_with_ttl(subject, Duration::minutes(DEFAULT_TTL_MINUTES))
    }

    /// Issue a token for a subject with an explicit lifetime.
    ///
    /// # Arguments
    /// * `subject` - User identifier encoded as the `sub` claim
    /// * `ttl` - Time until the token expires, must be positive
    ///
    /// # Errors
    /// * `EncodingFailed` - Non-positive ttl, or token encoding failed
    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        if ttl <= Duration::zero() {
            return Err(JwtError::EncodingFailed(format!(
                "token ttl must be positive, got {ttl}"
            )));
        }

        self.encode(&Claims::new(subject, ttl))
    }

    /// Encode pre-built claims into a token.
    ///
    /// Encoding is deterministic: identical claims and secret produce
    /// an identical token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Checks the signature with the same secret and algorithm used at
    /// issuance, then the expiry (no leeway), then that the subject is
    /// present and non-empty.
    ///
    /// # Errors
    /// * `TokenExpired` - Signature is valid but `exp` has passed
    /// * `InvalidToken` - Malformed, tampered, wrong algorithm, or
    ///   missing/empty subject
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    _ => JwtError::InvalidToken(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.sub.is_empty() {
            return Err(JwtError::InvalidToken("empty subject".to_string()));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_verify() {
        let handler = JwtHandler::new(SECRET);

        let token = handler.issue("user123").expect("Failed to issue token");
        assert!(!token.is_empty());

        let claims = handler.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.exp - claims.iat, DEFAULT_TTL_MINUTES * 60);
    }

    #[test]
    fn test_issue_with_ttl_override() {
        let handler = JwtHandler::new(SECRET);

        let token = handler
            .issue_with_ttl("user123", Duration::minutes(30))
            .expect("Failed to issue token");

        let claims = handler.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_issue_rejects_non_positive_ttl() {
        let handler = JwtHandler::new(SECRET);

        assert!(matches!(
            handler.issue_with_ttl("user123", Duration::zero()),
            Err(JwtError::EncodingFailed(_))
        ));
        assert!(matches!(
            handler.issue_with_ttl("user123", Duration::minutes(-5)),
            Err(JwtError::EncodingFailed(_))
        ));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::with_timestamps("user123", 1_700_000_000, 1_700_000_900);

        let first = handler.encode(&claims).expect("Failed to encode");
        let second = handler.encode(&claims).expect("Failed to encode");
        assert_eq!(first, second);
    }

    #[test]
    fn test_verify_expired_token() {
        let handler = JwtHandler::new(SECRET);

        // Issued in the past, expired a minute ago
        let now = Utc::now().timestamp();
        let claims = Claims::with_timestamps("user123", now - 3600, now - 60);
        let token = handler.encode(&claims).expect("Failed to encode");

        assert!(matches!(
            handler.verify(&token),
            Err(JwtError::TokenExpired)
        ));
    }

    #[test]
    fn test_verify_malformed_token() {
        let handler = JwtHandler::new(SECRET);

        assert!(matches!(
            handler.verify("invalid.token.here"),
            Err(JwtError::InvalidToken(_))
        ));
        assert!(matches!(
            handler.verify(""),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let issuer = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let verifier = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = issuer.issue("user123").expect("Failed to issue token");

        assert!(matches!(
            verifier.verify(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_tampered_token() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.issue("user123").expect("Failed to issue token");

        // Flip one character in each segment: header, payload, signature
        for segment in 0..3 {
            let mut parts: Vec<String> =
                token.split('.').map(|s| s.to_string()).collect();
            let original = parts[segment].clone();
            let replacement = if original.starts_with('A') { "B" } else { "A" };
            parts[segment].replace_range(0..1, replacement);
            let tampered = parts.join(".");
            assert_ne!(tampered, token);

            assert!(
                matches!(handler.verify(&tampered), Err(JwtError::InvalidToken(_))),
                "tampering with segment {segment} was not rejected"
            );
        }
    }

    #[test]
    fn test_verify_rejects_empty_subject() {
        let handler = JwtHandler::new(SECRET);

        let claims = Claims::new("", Duration::minutes(15));
        let token = handler.encode(&claims).expect("Failed to encode");

        assert!(matches!(
            handler.verify(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }
}
