use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::User;
use crate::domain::account::models::Username;
use crate::domain::account::ports::CredentialStore;

/// Credential store backed by the `users` table.
///
/// The primary key on `username` is the uniqueness authority; a violated
/// constraint on insert is how a lost registration race surfaces.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CredentialRow {
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_user(self) -> Result<User, AccountError> {
        Ok(User {
            username: Username::new(self.username)?,
            password_hash: self.password_hash,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AccountError> {
        let row: Option<CredentialRow> = sqlx::query_as(
            r#"
            SELECT username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

        row.map(CredentialRow::into_user).transpose()
    }

    async fn insert(&self, user: User) -> Result<(), AccountError> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountError::AlreadyExists;
                }
            }
            AccountError::Database(e.to_string())
        })?;

        Ok(())
    }
}
