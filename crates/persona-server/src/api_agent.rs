//! Agent control proxy endpoints.
//!
//! Thin pass-throughs to the externally-hosted voice-agent backend:
//! - `POST /api/agent/start` → remote `POST {base}/start`
//! - `POST /api/agent/stop`  → remote `POST {base}/close`
//!
//! Both also accept `GET` as an alias for quick manual testing from a
//! browser. The raw request body is forwarded verbatim when non-empty, the
//! remote call is bounded by the configured timeout, and every failure mode
//! is converted to a structured JSON error: 500 when the backend URL is
//! unconfigured or the call itself fails, 502 (with the upstream status and
//! body attached) when the backend answers with a failure status.

use crate::api::ApiError;
use crate::AppState;
use axum::{extract::Extension, Json};
use reqwest::header;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const START_PATH: &str = "/start";
const STOP_PATH: &str = "/close";

/// Handler for `POST|GET /api/agent/start`.
pub async fn start_agent_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: String,
) -> Result<Json<Value>, ApiError> {
    proxy_to_backend(&state, START_PATH, body).await
}

/// Handler for `POST|GET /api/agent/stop`.
pub async fn stop_agent_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: String,
) -> Result<Json<Value>, ApiError> {
    proxy_to_backend(&state, STOP_PATH, body).await
}

/// Forwards a control call to the agent backend and normalizes the outcome.
async fn proxy_to_backend(
    state: &AppState,
    path: &str,
    body: String,
) -> Result<Json<Value>, ApiError> {
    let base = state.config.agent.backend_url.as_deref().ok_or_else(|| {
        ApiError::Config(
            "agent backend URL is not configured (set PERSONA_AGENT_BACKEND_URL)".to_string(),
        )
    })?;

    let base = url::Url::parse(base)
        .map_err(|e| ApiError::Config(format!("invalid agent backend URL: {}", e)))?;
    let target = base
        .join(path)
        .map_err(|e| ApiError::Config(format!("invalid agent backend URL: {}", e)))?;

    let mut request = state
        .http
        .post(target.clone())
        .header(header::CONTENT_TYPE, "application/json")
        .timeout(Duration::from_secs(state.config.agent.timeout_secs));
    if !body.trim().is_empty() {
        request = request.body(body);
    }

    let response = request.send().await.map_err(|e| {
        tracing::warn!(url = %target, error = %e, "agent backend call failed");
        ApiError::Transport(e.to_string())
    })?;

    let status = response.status();
    let data = decode_upstream_body(response).await?;

    if !status.is_success() {
        tracing::warn!(url = %target, status = %status, "agent backend returned failure");
        return Err(ApiError::Upstream {
            message: "agent backend returned a failure status (check PERSONA_AGENT_BACKEND_URL)"
                .to_string(),
            status: status.as_u16(),
            data,
        });
    }

    tracing::debug!(url = %target, "agent backend call succeeded");
    Ok(Json(json!({ "ok": true, "data": data })))
}

/// Decodes an upstream body as JSON when declared as such, as text otherwise.
async fn decode_upstream_body(response: reqwest::Response) -> Result<Value, ApiError> {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.contains("application/json"))
        .unwrap_or(false);

    if is_json {
        response
            .json()
            .await
            .map_err(|e| ApiError::Transport(format!("undecodable upstream JSON body: {}", e)))
    } else {
        response
            .text()
            .await
            .map(Value::String)
            .map_err(|e| ApiError::Transport(format!("unreadable upstream body: {}", e)))
    }
}
