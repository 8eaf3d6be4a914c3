use std::sync::Arc;

use auth::PasswordHasher;
use auth::PasswordPolicy;
use auth::TokenService;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::User;
use crate::domain::account::models::Username;
use crate::domain::account::ports::CredentialStore;

/// Registration and login orchestration.
///
/// Composes the password policy, credential store, and token service. The
/// store's uniqueness constraint is the authoritative duplicate signal; the
/// lookup before insert is only a fast path.
pub struct AccountService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    tokens: Arc<TokenService>,
    policy: PasswordPolicy,
    hasher: PasswordHasher,
    // Verified against when the username is unknown, so a login miss costs
    // the same hash work as a real password check.
    dummy_hash: String,
}

impl<CS> AccountService<CS>
where
    CS: CredentialStore,
{
    /// Create an account service with injected dependencies.
    ///
    /// # Errors
    /// * `Password` - Computing the timing-equalization hash failed
    pub fn new(store: Arc<CS>, tokens: Arc<TokenService>) -> Result<Self, AccountError> {
        let hasher = PasswordHasher::new();
        let dummy_hash = hasher.hash("timing-equalizer")?;

        Ok(Self {
            store,
            tokens,
            policy: PasswordPolicy::new(),
            hasher,
            dummy_hash,
        })
    }

    /// The password rules, in the wording returned to clients.
    pub fn password_requirements(&self) -> &'static str {
        self.policy.requirements()
    }

    /// Register a new user.
    ///
    /// The existing-user check takes precedence over the password check: a
    /// taken username is `AlreadyExists` regardless of password strength.
    /// A registration losing the insert race surfaces the store's
    /// `AlreadyExists` identically.
    ///
    /// # Errors
    /// * `AlreadyExists` - The username is taken
    /// * `WeakPassword` - The password fails the complexity policy
    /// * `Password` - Hashing failed
    /// * `Database` - Storage failed
    pub async fn register(
        &self,
        username: Username,
        password: &str,
    ) -> Result<Username, AccountError> {
        if self
            .store
            .find_by_username(username.as_str())
            .await?
            .is_some()
        {
            tracing::warn!(username = %username, "User already exists");
            return Err(AccountError::AlreadyExists);
        }

        if !self.policy.is_acceptable(password) {
            tracing::warn!(username = %username, "Password does not meet the requirements");
            return Err(AccountError::WeakPassword);
        }

        let user = User {
            username: username.clone(),
            password_hash: self.hasher.hash(password)?,
            created_at: Utc::now(),
        };

        self.store.insert(user).await?;
        tracing::info!(username = %username, "User registered successfully");

        Ok(username)
    }

    /// Authenticate a user and issue an access token.
    ///
    /// An unknown username and a wrong password produce the same error, and
    /// the unknown-username path still performs one hash verification so the
    /// two are not distinguishable by timing either.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Token` - Token issuance failed
    /// * `Database` - Lookup failed
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AccountError> {
        let user = self.store.find_by_username(username).await?;

        let password_matches = match &user {
            Some(user) => self.verify_password(password, &user.password_hash),
            None => {
                self.verify_password(password, &self.dummy_hash);
                false
            }
        };

        if !password_matches {
            tracing::warn!(username, "Invalid login attempt");
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.tokens.issue(username)?;
        tracing::info!(username, "User logged in successfully");

        Ok(token)
    }

    // A stored hash that fails to parse counts as a mismatch, not an error.
    fn verify_password(&self, password: &str, hash: &str) -> bool {
        self.hasher.verify(password, hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Duration;
    use jsonwebtoken::Algorithm;
    use mockall::mock;

    use super::*;

    // Define mocks in the test module using mockall
    mock! {
        pub TestCredentialStore {}

        #[async_trait]
        impl CredentialStore for TestCredentialStore {
            async fn find_by_username(&self, username: &str) -> Result<Option<User>, AccountError>;
            async fn insert(&self, user: User) -> Result<(), AccountError>;
        }
    }

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(
            b"test-secret-key-for-jwt-signing-at-least-32-bytes",
            Algorithm::HS256,
            Duration::minutes(15),
        ))
    }

    fn stored_user(username: &str, password: &str) -> User {
        User {
            username: Username::new(username.to_string()).unwrap(),
            password_hash: PasswordHasher::new().hash(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_username()
            .withf(|username| username == "new_user")
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_insert()
            .withf(|user| {
                user.username.as_str() == "new_user"
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "@gOOd123@"
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = AccountService::new(Arc::new(store), token_service()).unwrap();

        let username = Username::new("new_user".to_string()).unwrap();
        let result = service.register(username, "@gOOd123@").await;

        assert_eq!(result.unwrap().as_str(), "new_user");
    }

    #[tokio::test]
    async fn test_register_existing_username() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_user("kot", "@gOOd123@"))));
        store.expect_insert().times(0);

        let service = AccountService::new(Arc::new(store), token_service()).unwrap();

        let username = Username::new("kot".to_string()).unwrap();
        let result = service.register(username, "@gOOd123@").await;

        assert!(matches!(result, Err(AccountError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_register_existing_username_wins_over_weak_password() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_user("kot", "@gOOd123@"))));
        store.expect_insert().times(0);

        let service = AccountService::new(Arc::new(store), token_service()).unwrap();

        let username = Username::new("kot".to_string()).unwrap();
        let result = service.register(username, "123").await;

        assert!(matches!(result, Err(AccountError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_register_weak_password() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        store.expect_insert().times(0);

        let service = AccountService::new(Arc::new(store), token_service()).unwrap();

        let username = Username::new("new_user".to_string()).unwrap();
        let result = service.register(username, "123").await;

        assert!(matches!(result, Err(AccountError::WeakPassword)));
    }

    #[tokio::test]
    async fn test_register_lost_insert_race() {
        let mut store = MockTestCredentialStore::new();

        // The fast-path lookup sees nothing, but a concurrent registration
        // wins the insert; the store's conflict is authoritative.
        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_insert()
            .times(1)
            .returning(|_| Err(AccountError::AlreadyExists));

        let service = AccountService::new(Arc::new(store), token_service()).unwrap();

        let username = Username::new("new_user".to_string()).unwrap();
        let result = service.register(username, "@gOOd123@").await;

        assert!(matches!(result, Err(AccountError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_login_success_issues_verifiable_token() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_username()
            .withf(|username| username == "kot")
            .times(1)
            .returning(|_| Ok(Some(stored_user("kot", "@gOOd123@"))));

        let tokens = token_service();
        let service = AccountService::new(Arc::new(store), Arc::clone(&tokens)).unwrap();

        let token = service.login("kot", "@gOOd123@").await.unwrap();

        assert_eq!(tokens.verify(&token).unwrap(), "kot");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_user("kot", "@gOOd123@"))));

        let service = AccountService::new(Arc::new(store), token_service()).unwrap();

        let result = service.login("kot", "dog").await;

        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(store), token_service()).unwrap();

        let result = service.login("ghost", "@gOOd123@").await;

        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unparseable_stored_hash_is_a_mismatch() {
        let mut store = MockTestCredentialStore::new();

        store.expect_find_by_username().times(1).returning(|_| {
            Ok(Some(User {
                username: Username::new("kot".to_string()).unwrap(),
                password_hash: "not_a_phc_string".to_string(),
                created_at: Utc::now(),
            }))
        });

        let service = AccountService::new(Arc::new(store), token_service()).unwrap();

        let result = service.login("kot", "@gOOd123@").await;

        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }
}
