//! Shared API error type for the Persona server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use thiserror::Error;

/// API error type mapping to HTTP status codes and structured JSON bodies.
///
/// Every handler failure is converted into one of these; nothing propagates
/// as an unhandled fault.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required configuration value is missing or malformed.
    #[error("{0}")]
    Config(String),

    /// The upstream was unreachable or the call itself failed (timeout,
    /// connection error, undecodable body).
    #[error("{0}")]
    Transport(String),

    /// The upstream was reachable but returned a failure status. The
    /// upstream status and body are attached for diagnostics.
    #[error("{message}")]
    Upstream {
        message: String,
        status: u16,
        data: Value,
    },

    /// Token minting failed inside the LiveKit SDK.
    #[error("failed to generate token: {0}")]
    Token(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Upstream {
                message,
                status,
                data,
            } => (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "error": message,
                    "status": status,
                    "data": data,
                })),
            )
                .into_response(),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": other.to_string() })),
            )
                .into_response(),
        }
    }
}
