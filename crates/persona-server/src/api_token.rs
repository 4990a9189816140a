//! Join-token endpoint.
//!
//! `GET /api/token?room=<room>&username=<username>` — mints a short-lived
//! LiveKit join token for the requested room and identity, falling back to
//! the configured demo room and placeholder identity when the query omits
//! them. Responds `{ "token": ..., "url": ... }`, where `url` is the
//! browser-facing LiveKit endpoint.

use crate::api::ApiError;
use crate::token::{TokenError, TokenMinter};
use crate::AppState;
use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub room: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub url: String,
}

/// Handler for `GET /api/token`.
pub async fn token_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<TokenQuery>,
) -> Result<Json<TokenResponse>, ApiError> {
    let minter = TokenMinter::from_config(&state.config.livekit).map_err(|e| match e {
        TokenError::LiveKit(_) => ApiError::Token(e.to_string()),
        _ => ApiError::Config(e.to_string()),
    })?;

    let room = params
        .room
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| state.config.livekit.default_room.clone());
    let username = params
        .username
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| state.config.livekit.default_identity.clone());

    tracing::info!(room = %room, username = %username, "minting join token");

    let token = minter
        .mint(&room, &username)
        .map_err(|e| ApiError::Token(e.to_string()))?;

    Ok(Json(TokenResponse {
        token,
        url: minter.public_url().to_string(),
    }))
}
