use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::convert_currency::convert_currency;
use super::handlers::list_currencies::list_currencies;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::require_bearer;
use crate::domain::account::ports::CredentialStore;
use crate::domain::account::service::AccountService;
use crate::domain::exchange::ports::CurrencyGateway;

/// Shared state injected into handlers and middleware.
///
/// Generic over the two outbound ports so tests can run the real router
/// against in-process adapters.
pub struct AppState<CS, GW>
where
    CS: CredentialStore,
    GW: CurrencyGateway,
{
    pub account_service: Arc<AccountService<CS>>,
    pub currency_gateway: Arc<GW>,
    pub token_service: Arc<TokenService>,
}

impl<CS, GW> Clone for AppState<CS, GW>
where
    CS: CredentialStore,
    GW: CurrencyGateway,
{
    fn clone(&self) -> Self {
        Self {
            account_service: Arc::clone(&self.account_service),
            currency_gateway: Arc::clone(&self.currency_gateway),
            token_service: Arc::clone(&self.token_service),
        }
    }
}

pub fn create_router<CS, GW>(
    account_service: Arc<AccountService<CS>>,
    currency_gateway: Arc<GW>,
    token_service: Arc<TokenService>,
) -> Router
where
    CS: CredentialStore,
    GW: CurrencyGateway,
{
    let state = AppState {
        account_service,
        currency_gateway,
        token_service,
    };

    let public_routes = Router::new()
        .route("/auth/register/", post(register::<CS, GW>))
        .route("/auth/login/", post(login::<CS, GW>));

    let protected_routes = Router::new()
        .route("/currency/list/", get(list_currencies::<CS, GW>))
        .route("/currency/exchange/", post(convert_currency::<CS, GW>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer::<CS, GW>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
