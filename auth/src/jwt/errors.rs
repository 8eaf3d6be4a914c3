use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures form a closed set: a structurally valid token past
/// its expiry is `Expired`; every other failure (signature mismatch,
/// malformed structure, wrong algorithm) is `Invalid`.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}
