//! Lantern — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lantern_core::error::BridgeError;
use serde::Serialize;

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `BridgeError` that implements `IntoResponse`.
///
/// Only reaches the wire for chat-platform failures the webhook caller
/// should retry; game-runner failures inside a turn become the apology
/// reply instead.
#[derive(Debug)]
pub struct ApiError(pub BridgeError);

impl From<BridgeError> for ApiError {
    fn from(err: BridgeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            BridgeError::Transport(_) => (StatusCode::BAD_GATEWAY, "transport_error"),
            BridgeError::Protocol(_) => (StatusCode::BAD_GATEWAY, "protocol_error"),
            BridgeError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
