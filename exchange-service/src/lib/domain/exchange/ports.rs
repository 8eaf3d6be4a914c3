use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::exchange::errors::GatewayError;
use crate::domain::exchange::models::ConversionRequest;

/// Outbound contract for the third-party currency-exchange API.
///
/// The service proxies this API without interpreting its data beyond
/// reshaping responses; the upstream's own behavior is out of scope.
#[async_trait]
pub trait CurrencyGateway: Send + Sync + 'static {
    /// Fetch the supported currencies as a code → display-name map.
    ///
    /// # Errors
    /// * `Unreachable` - The upstream could not be reached
    /// * `MalformedResponse` - The upstream response could not be reshaped
    async fn list(&self) -> Result<BTreeMap<String, String>, GatewayError>;

    /// Convert `request.amount` from one currency to another.
    ///
    /// # Errors
    /// * `Unreachable` - The upstream could not be reached
    /// * `MalformedResponse` - The upstream response could not be reshaped
    /// * `UnknownCurrency` - A currency code the upstream does not know
    async fn convert(&self, request: &ConversionRequest) -> Result<f64, GatewayError>;
}
