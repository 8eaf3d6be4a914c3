use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must not be empty")]
    Empty,
}

/// Top-level error for registration, login, and credential storage.
///
/// Business outcomes travel as values of this type up to the HTTP layer;
/// nothing here is ever raised across a component boundary as a panic.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("A user with this same name already exists")]
    AlreadyExists,

    #[error("Password does not meet the complexity requirements")]
    WeakPassword,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    Database(String),
}
