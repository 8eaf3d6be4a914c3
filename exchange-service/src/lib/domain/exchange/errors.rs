use thiserror::Error;

/// Error type for currency gateway operations.
///
/// Upstream failures are reshaped into this closed set and reported to the
/// caller as structured payloads; they never crash the server.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Currency API is unreachable: {0}")]
    Unreachable(String),

    #[error("Currency API returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unknown currency code")]
    UnknownCurrency,
}
