use axum::extract::State;
use axum::Json;
use serde_json::json;
use serde_json::Value;

use crate::domain::account::ports::CredentialStore;
use crate::domain::exchange::ports::CurrencyGateway;
use crate::inbound::http::router::AppState;

/// `GET /currency/list/`
///
/// Proxies the upstream currency list. Upstream failures become structured
/// error payloads rather than transport errors.
pub async fn list_currencies<CS, GW>(State(state): State<AppState<CS, GW>>) -> Json<Value>
where
    CS: CredentialStore,
    GW: CurrencyGateway,
{
    tracing::info!("User requested currency list");

    match state.currency_gateway.list().await {
        Ok(currencies) => Json(json!(currencies)),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching currency list");
            Json(json!({ "error": "Failed to fetch currency list" }))
        }
    }
}
