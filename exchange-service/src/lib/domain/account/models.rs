use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::errors::UsernameError;

/// Credential record for a registered user.
///
/// Created on registration and never mutated afterwards; there is no
/// password-change flow. The stored hash is derived from the password and
/// never contains the plaintext.
#[derive(Debug, Clone)]
pub struct User {
    pub username: Username,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Username value type
///
/// The unique, immutable user identifier. Any non-empty string is valid;
/// lookups are exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Username is the empty string
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(username))
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
