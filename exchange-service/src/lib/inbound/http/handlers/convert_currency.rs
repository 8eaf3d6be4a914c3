use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use serde_json::Value;

use crate::domain::account::ports::CredentialStore;
use crate::domain::exchange::errors::GatewayError;
use crate::domain::exchange::models::ConversionRequest;
use crate::domain::exchange::ports::CurrencyGateway;
use crate::inbound::http::router::AppState;

/// HTTP request body for a conversion (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConvertCurrencyRequest {
    #[serde(default = "default_amount")]
    amount: i64,
    #[serde(default = "default_from_currency")]
    from_currency: String,
    #[serde(default = "default_to_currency")]
    to_currency: String,
}

fn default_amount() -> i64 {
    1
}

fn default_from_currency() -> String {
    "USD".to_string()
}

fn default_to_currency() -> String {
    "RUB".to_string()
}

impl ConvertCurrencyRequest {
    fn into_request(self) -> ConversionRequest {
        ConversionRequest {
            amount: self.amount,
            from_currency: self.from_currency,
            to_currency: self.to_currency,
        }
    }
}

/// `POST /currency/exchange/`
///
/// Proxies the upstream conversion endpoint; the response carries either
/// the converted total or a structured error.
pub async fn convert_currency<CS, GW>(
    State(state): State<AppState<CS, GW>>,
    Json(body): Json<ConvertCurrencyRequest>,
) -> Json<Value>
where
    CS: CredentialStore,
    GW: CurrencyGateway,
{
    let request = body.into_request();
    tracing::info!(
        amount = request.amount,
        from = %request.from_currency,
        to = %request.to_currency,
        "User requested currency conversion"
    );

    match state.currency_gateway.convert(&request).await {
        Ok(total) => Json(json!({ "total": total })),
        Err(GatewayError::UnknownCurrency) => {
            tracing::error!(
                from = %request.from_currency,
                to = %request.to_currency,
                "Invalid currency code"
            );
            Json(json!({
                "error": "Unknown currency code; see /currency/list/ for valid codes"
            }))
        }
        Err(e) => {
            tracing::error!(error = %e, "Error converting currency");
            Json(json!({ "error": "Failed to convert currency" }))
        }
    }
}
