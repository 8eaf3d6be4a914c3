use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::account::errors::AccountError;
use crate::domain::account::ports::CredentialStore;
use crate::domain::exchange::ports::CurrencyGateway;
use crate::inbound::http::router::AppState;

/// Form-encoded password-grant request body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
    // OAuth2 password-grant discriminator; optional, but when present it
    // must name the only grant this endpoint implements.
    #[serde(default)]
    grant_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// `POST /auth/login/`
///
/// Failure is a uniform 401 whether the username is unknown or the
/// password is wrong.
pub async fn login<CS, GW>(
    State(state): State<AppState<CS, GW>>,
    Form(form): Form<LoginForm>,
) -> Result<Json<AccessTokenResponse>, ApiError>
where
    CS: CredentialStore,
    GW: CurrencyGateway,
{
    if let Some(grant_type) = &form.grant_type {
        if grant_type != "password" {
            return Err(ApiError::UnprocessableEntity(format!(
                "Unsupported grant_type {:?}; only \"password\" is supported",
                grant_type
            )));
        }
    }

    match state
        .account_service
        .login(&form.username, &form.password)
        .await
    {
        Ok(access_token) => Ok(Json(AccessTokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        })),
        Err(AccountError::InvalidCredentials) => Err(ApiError::Unauthorized),
        Err(e) => {
            tracing::error!(error = %e, "Login failed");
            Err(ApiError::InternalServerError)
        }
    }
}
