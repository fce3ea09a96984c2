//! Gateway error responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors surfaced to downstream callers as genuine HTTP failures
///
/// Deliberately small: upstream trouble is delivered in-band as response
/// content, so the only failure left on this path is a request body that
/// does not parse into the expected shape. Such requests are rejected
/// before any upstream query is opened.
#[derive(Debug)]
pub(super) enum GatewayError {
    /// Body failed to deserialize into a chat request.
    InvalidBody(String),
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            GatewayError::InvalidBody(message) => (StatusCode::BAD_REQUEST, message),
        };

        tracing::error!("Request rejected: {} - {}", status, message);

        let body = Json(json!({
            "error": {
                "message": message,
                "type": "invalid_request_error",
                "param": null,
                "code": null,
            }
        }));

        (status, body).into_response()
    }
}
