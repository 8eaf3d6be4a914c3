use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::jwt::Claims;
use crate::jwt::JwtHandler;
use crate::jwt::TokenError;

/// Issues and verifies signed, time-limited bearer tokens.
///
/// Stateless: a token carries everything needed to verify it, so no session
/// storage is required and any service instance can verify tokens issued by
/// its peers. Issued tokens cannot be revoked before expiry; the short
/// default lifetime bounds that window.
pub struct TokenService {
    handler: JwtHandler,
    default_ttl: Duration,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing key (deployment secret)
    /// * `algorithm` - HMAC signing algorithm (HS256/HS384/HS512)
    /// * `default_ttl` - Lifetime applied by [`issue`](Self::issue)
    pub fn new(secret: &[u8], algorithm: Algorithm, default_ttl: Duration) -> Self {
        Self {
            handler: JwtHandler::new(secret, algorithm),
            default_ttl,
        }
    }

    /// Issue a token for `subject` with the default lifetime.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_with_ttl(subject, self.default_ttl)
    }

    /// Issue a token for `subject` expiring `ttl` from now.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        self.handler.encode(&Claims::new(subject, ttl))
    }

    /// Verify a token and return the subject it was issued to.
    ///
    /// # Errors
    /// * `Expired` - Signature is valid but the token is past its expiry
    /// * `Invalid` - Signature mismatch, malformed structure, or wrong algorithm
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.handler.decode(token).map(|claims| claims.sub)
    }
}
