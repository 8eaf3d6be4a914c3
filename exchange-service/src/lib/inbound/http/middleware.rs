use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::account::ports::CredentialStore;
use crate::domain::exchange::ports::CurrencyGateway;
use crate::inbound::http::router::AppState;

/// Extension type carrying the verified token subject.
///
/// Inserted for every authenticated request; handlers extract it when they
/// need the caller's identity.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub subject: String,
}

/// Middleware guarding protected routes.
///
/// Extracts the bearer token from the authorization header, verifies it,
/// and short-circuits with a uniform 401 before the handler runs when the
/// token is missing, invalid, or expired.
pub async fn require_bearer<CS, GW>(
    State(state): State<AppState<CS, GW>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response>
where
    CS: CredentialStore,
    GW: CurrencyGateway,
{
    let token = extract_bearer_token(&req)?;

    let subject = state.token_service.verify(token).map_err(|e| {
        match e {
            TokenError::Expired => tracing::warn!("Token has expired"),
            _ => tracing::warn!(error = %e, "Token validation failed"),
        }
        ApiError::Unauthorized.into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { subject });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized.into_response())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized.into_response())?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized.into_response())
}
