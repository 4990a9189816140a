//! Persona server library logic.
//!
//! A thin presentation backend for the Persona avatar front-end: it mints
//! LiveKit join tokens, proxies start/stop calls to the remote voice-agent
//! backend, and serves the client bundle (including the avatar video
//! assets).

pub mod api;
pub mod api_agent;
pub mod api_token;
pub mod config;
pub mod token;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Application state shared across all request handlers.
pub struct AppState {
    /// Server configuration.
    pub config: config::Config,
    /// Shared HTTP client for upstream calls.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("persona-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { config, http }
    }
}

/// Maximum request body size (1 MiB). The proxied control calls carry at
/// most a small JSON payload.
const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/token", get(api_token::token_handler))
        .route(
            "/api/agent/start",
            post(api_agent::start_agent_handler).get(api_agent::start_agent_handler),
        )
        .route(
            "/api/agent/stop",
            post(api_agent::stop_agent_handler).get(api_agent::stop_agent_handler),
        );

    // Serve the client bundle (index.html, avatar clips under /videos) if
    // present. Configured via PERSONA_CLIENT_DIR; defaults to "client/dist".
    let client_dir =
        std::env::var("PERSONA_CLIENT_DIR").unwrap_or_else(|_| "client/dist".to_string());
    let router = if std::path::Path::new(&client_dir).join("index.html").exists() {
        tracing::info!(path = %client_dir, "serving client static files");
        let index = format!("{}/index.html", client_dir);
        router.fallback_service(ServeDir::new(&client_dir).fallback(ServeFile::new(index)))
    } else {
        tracing::info!(path = %client_dir, "client directory not found, skipping static file serving");
        router
    };

    router
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_check_returns_ok() {
        let app = app(AppState::new(config::Config::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }
}
