//! LiveKit join-token minting.

use crate::config::LiveKitConfig;
use livekit_api::access_token::{AccessToken, AccessTokenError, VideoGrants};
use std::time::Duration;
use thiserror::Error;

/// Errors from assembling or signing a join token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error(
        "LiveKit credentials are not configured \
         (set PERSONA_LIVEKIT_API_KEY and PERSONA_LIVEKIT_API_SECRET)"
    )]
    MissingCredentials,

    #[error("public LiveKit URL is not configured (set PERSONA_LIVEKIT_URL)")]
    MissingPublicUrl,

    #[error("LiveKit API error: {0}")]
    LiveKit(#[from] AccessTokenError),
}

/// Mints signed room join tokens from a validated credential set.
pub struct TokenMinter {
    api_key: String,
    api_secret: String,
    public_url: String,
    ttl: Duration,
}

impl std::fmt::Debug for TokenMinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenMinter")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("public_url", &self.public_url)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenMinter {
    /// Builds a minter from configuration, verifying all required values.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::MissingCredentials` or
    /// `TokenError::MissingPublicUrl` when a required value is absent.
    pub fn from_config(config: &LiveKitConfig) -> Result<Self, TokenError> {
        let (api_key, api_secret) = match (&config.api_key, &config.api_secret) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                (key.clone(), secret.clone())
            }
            _ => return Err(TokenError::MissingCredentials),
        };

        let public_url = match &config.public_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => return Err(TokenError::MissingPublicUrl),
        };

        Ok(Self {
            api_key,
            api_secret,
            public_url,
            ttl: Duration::from_secs(config.token_ttl_seconds),
        })
    }

    /// The browser-facing LiveKit URL handed out alongside tokens.
    pub fn public_url(&self) -> &str {
        &self.public_url
    }

    /// Signs a join token granting full publish/subscribe access to a room.
    pub fn mint(&self, room: &str, identity: &str) -> Result<String, TokenError> {
        let token = AccessToken::with_api_key(&self.api_key, &self.api_secret)
            .with_identity(identity)
            .with_name(identity)
            .with_grants(VideoGrants {
                room_join: true,
                room: room.to_string(),
                can_publish: true,
                can_subscribe: true,
                can_publish_data: true,
                ..Default::default()
            })
            .with_ttl(self.ttl);

        token.to_jwt().map_err(TokenError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> LiveKitConfig {
        let mut config = LiveKitConfig::default();
        config.api_key = Some("devkey".to_string());
        config.api_secret = Some("devsecret-devsecret-devsecret".to_string());
        config.public_url = Some("wss://livekit.example.com".to_string());
        config
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let mut config = full_config();
        config.api_secret = None;
        assert!(matches!(
            TokenMinter::from_config(&config),
            Err(TokenError::MissingCredentials)
        ));

        let mut config = full_config();
        config.api_key = Some(String::new());
        assert!(matches!(
            TokenMinter::from_config(&config),
            Err(TokenError::MissingCredentials)
        ));
    }

    #[test]
    fn missing_public_url_is_rejected() {
        let mut config = full_config();
        config.public_url = None;
        assert!(matches!(
            TokenMinter::from_config(&config),
            Err(TokenError::MissingPublicUrl)
        ));
    }

    #[test]
    fn mints_a_nonempty_token() {
        let minter = TokenMinter::from_config(&full_config()).expect("config is complete");
        let token = minter.mint("demo", "guest").expect("minting succeeds");
        assert!(!token.is_empty());
        assert_eq!(minter.public_url(), "wss://livekit.example.com");
    }
}
