//! Authentication utilities library
//!
//! Provides the authentication building blocks for the exchange service:
//! - Password hashing (Argon2id)
//! - Password complexity policy
//! - Signed, time-limited bearer tokens (JWT)
//!
//! The service's domain layer composes these pieces; nothing in this crate
//! performs I/O or holds mutable state, so everything here is safe to share
//! across request tasks.
//!
//! # Examples
//!
//! ## Password policy and hashing
//! ```
//! use auth::{PasswordHasher, PasswordPolicy};
//!
//! let policy = PasswordPolicy::new();
//! assert!(policy.is_acceptable("@gOOd123@"));
//! assert!(!policy.is_acceptable("123"));
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("@gOOd123@").unwrap();
//! assert!(hasher.verify("@gOOd123@", &hash).unwrap());
//! ```
//!
//! ## Bearer tokens
//! ```
//! use auth::TokenService;
//! use chrono::Duration;
//! use jsonwebtoken::Algorithm;
//!
//! let tokens = TokenService::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Algorithm::HS256,
//!     Duration::minutes(15),
//! );
//! let token = tokens.issue("alice").unwrap();
//! assert_eq!(tokens.verify(&token).unwrap(), "alice");
//! ```

pub mod jwt;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtHandler;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use token::TokenService;
