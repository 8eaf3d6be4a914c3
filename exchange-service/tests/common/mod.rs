use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenService;
use chrono::Duration;
use exchange_service::domain::account::errors::AccountError;
use exchange_service::domain::account::models::User;
use exchange_service::domain::account::ports::CredentialStore;
use exchange_service::domain::account::service::AccountService;
use exchange_service::domain::exchange::errors::GatewayError;
use exchange_service::domain::exchange::models::ConversionRequest;
use exchange_service::domain::exchange::ports::CurrencyGateway;
use exchange_service::inbound::http::router::create_router;
use jsonwebtoken::Algorithm;
use tokio::sync::Mutex;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Credential store backed by a mutex-guarded map.
///
/// `insert` checks and writes under one lock, so uniqueness is enforced
/// atomically, exactly like the database constraint it stands in for.
pub struct InMemoryCredentialStore {
    records: Mutex<HashMap<String, User>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AccountError> {
        Ok(self.records.lock().await.get(username).cloned())
    }

    async fn insert(&self, user: User) -> Result<(), AccountError> {
        let mut records = self.records.lock().await;
        if records.contains_key(user.username.as_str()) {
            return Err(AccountError::AlreadyExists);
        }
        records.insert(user.username.as_str().to_string(), user);
        Ok(())
    }
}

/// Gateway stub returning canned upstream responses.
///
/// Conversion multiplies by a fixed rate; the code "INVALID" reproduces the
/// upstream's unknown-currency behavior.
pub struct StubCurrencyGateway;

#[async_trait]
impl CurrencyGateway for StubCurrencyGateway {
    async fn list(&self) -> Result<BTreeMap<String, String>, GatewayError> {
        Ok(BTreeMap::from([
            ("USD".to_string(), "United States Dollar".to_string()),
            ("EUR".to_string(), "Euro".to_string()),
            ("RUB".to_string(), "Russian Ruble".to_string()),
        ]))
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<f64, GatewayError> {
        if request.from_currency == "INVALID" || request.to_currency == "INVALID" {
            return Err(GatewayError::UnknownCurrency);
        }
        Ok(request.amount as f64 * 1.2)
    }
}

/// Test application that spawns a real server on a random port
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_service: Arc<TokenService>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_service = Arc::new(TokenService::new(
            TEST_SECRET,
            Algorithm::HS256,
            Duration::minutes(15),
        ));
        let store = Arc::new(InMemoryCredentialStore::new());
        let account_service = Arc::new(
            AccountService::new(Arc::clone(&store), Arc::clone(&token_service))
                .expect("Failed to create account service"),
        );
        let currency_gateway = Arc::new(StubCurrencyGateway);

        let router = create_router(account_service, currency_gateway, Arc::clone(&token_service));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_service,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Register a user and log in, returning a live bearer token.
    pub async fn bearer_token_for(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/auth/register/")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute register request");
        assert!(response.status().is_success());

        let response = self
            .post("/auth/login/")
            .form(&[
                ("username", username),
                ("password", password),
                ("grant_type", "password"),
            ])
            .send()
            .await
            .expect("Failed to execute login request");
        assert!(response.status().is_success());

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }
}
