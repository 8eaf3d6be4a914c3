use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::User;

/// Persistence contract for credential records.
///
/// The backing store enforces username uniqueness itself: `insert` reports
/// a violation as `AlreadyExists`, so concurrent registrations resolve at
/// the storage layer rather than through application-level locking. Multiple
/// service instances may share one store.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Look up a credential record by exact, case-sensitive username.
    ///
    /// # Returns
    /// The record, or `None` when no user has this username
    ///
    /// # Errors
    /// * `Database` - Lookup failed
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AccountError>;

    /// Durably persist a new credential record.
    ///
    /// The write is atomic: either the record exists afterwards or it does
    /// not; no half-written state survives a failure.
    ///
    /// # Errors
    /// * `AlreadyExists` - A record with this username already exists
    /// * `Database` - Write failed
    async fn insert(&self, user: User) -> Result<(), AccountError>;
}
