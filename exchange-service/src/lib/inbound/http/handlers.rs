use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

pub mod convert_currency;
pub mod list_currencies;
pub mod login;
pub mod register;

/// Transport-level error responses.
///
/// Business outcomes (weak password, duplicate user, gateway failures) are
/// encoded in each handler's 200 body; only these cases map to an HTTP
/// error status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401 with a uniform body and the `WWW-Authenticate` challenge.
    ///
    /// The same response covers a missing header, a bad token, and wrong
    /// credentials, so nothing about the failure cause leaks to the caller.
    Unauthorized,
    /// 422 for requests that fail structural validation.
    UnprocessableEntity(String),
    /// 500 for infrastructure failures; detail is logged, never returned.
    InternalServerError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response(),
            ApiError::UnprocessableEntity(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": message })),
            )
                .into_response(),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response(),
        }
    }
}
