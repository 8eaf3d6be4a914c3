use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use serde_json::Value;

use super::ApiError;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Username;
use crate::domain::account::ports::CredentialStore;
use crate::domain::exchange::ports::CurrencyGateway;
use crate::inbound::http::router::AppState;

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    password: String,
}

/// `POST /auth/register/`
///
/// Business outcomes are all 200 responses with distinct bodies; only
/// structural validation (an empty username) and infrastructure failures
/// map to non-200 statuses.
pub async fn register<CS, GW>(
    State(state): State<AppState<CS, GW>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<Value>, ApiError>
where
    CS: CredentialStore,
    GW: CurrencyGateway,
{
    let username =
        Username::new(body.username).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    match state
        .account_service
        .register(username, &body.password)
        .await
    {
        Ok(username) => Ok(Json(json!({
            "message": format!("Welcome to the club, {}", username)
        }))),
        Err(AccountError::AlreadyExists) => Ok(Json(json!({
            "error": "A user with this same name already exists"
        }))),
        Err(AccountError::WeakPassword) => Ok(Json(json!({
            "message": state.account_service.password_requirements()
        }))),
        Err(e) => {
            tracing::error!(error = %e, "Registration failed");
            Err(ApiError::InternalServerError)
        }
    }
}
