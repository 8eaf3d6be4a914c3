use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::exchange::errors::GatewayError;
use crate::domain::exchange::models::ConversionRequest;
use crate::domain::exchange::ports::CurrencyGateway;

/// Client for the apilayer `currency_data` API.
pub struct ApiLayerCurrencyGateway {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ApiLayerCurrencyGateway {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value, GatewayError> {
        let response = self
            .http
            .get(url)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl CurrencyGateway for ApiLayerCurrencyGateway {
    async fn list(&self) -> Result<BTreeMap<String, String>, GatewayError> {
        let url = format!("{}/list", self.base_url);
        let body = self.get_json(&url).await?;

        let currencies = parse_currency_list(&body)?;
        tracing::info!(
            count = currencies.len(),
            "Fetched currency list successfully"
        );

        Ok(currencies)
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<f64, GatewayError> {
        let url = format!(
            "{}/convert?to={}&from={}&amount={}",
            self.base_url, request.to_currency, request.from_currency, request.amount
        );
        let body = self.get_json(&url).await?;

        let total = parse_conversion_result(&body)?;
        tracing::info!(
            amount = request.amount,
            from = %request.from_currency,
            to = %request.to_currency,
            "Converted currency successfully"
        );

        Ok(total)
    }
}

/// Reshape the upstream list response into a code → name map.
fn parse_currency_list(body: &Value) -> Result<BTreeMap<String, String>, GatewayError> {
    let currencies = body
        .get("currencies")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            GatewayError::MalformedResponse("response has no 'currencies' object".to_string())
        })?;

    Ok(currencies
        .iter()
        .filter_map(|(code, name)| name.as_str().map(|n| (code.clone(), n.to_string())))
        .collect())
}

/// Extract the converted total; the upstream omits `result` for unknown
/// currency codes.
fn parse_conversion_result(body: &Value) -> Result<f64, GatewayError> {
    match body.get("result") {
        Some(result) => result
            .as_f64()
            .ok_or_else(|| GatewayError::MalformedResponse("'result' is not a number".to_string())),
        None => Err(GatewayError::UnknownCurrency),
    }
}
