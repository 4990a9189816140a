//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote voice-agent backend settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// LiveKit credential and token settings.
    #[serde(default)]
    pub livekit: LiveKitConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Remote agent backend the `/api/agent/*` endpoints proxy to.
///
/// The backend URL has no default: requests against an unconfigured backend
/// fail with an explicit configuration error rather than hitting a guessed
/// address.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Base URL of the agent control service (e.g. `https://agent.internal:8080`).
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Timeout for proxied calls, in seconds.
    #[serde(default = "default_agent_timeout_secs")]
    pub timeout_secs: u64,
}

/// LiveKit settings for minting room join tokens.
///
/// The credential pair and the browser-facing URL are required for the token
/// endpoint; their absence is a request-time error, never a silent default.
#[derive(Clone, Deserialize)]
pub struct LiveKitConfig {
    /// LiveKit API key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// LiveKit API secret.
    #[serde(default)]
    pub api_secret: Option<String>,

    /// Browser-facing LiveKit URL returned alongside tokens.
    #[serde(default)]
    pub public_url: Option<String>,

    /// JWT token TTL in seconds for join tokens. Default: 36000 (10 hours).
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: u64,

    /// Room name used when the token request does not name one.
    #[serde(default = "default_room")]
    pub default_room: String,

    /// Participant identity used when the token request does not name one.
    #[serde(default = "default_identity")]
    pub default_identity: String,
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("api_key", &self.api_key)
            .field(
                "api_secret",
                &self.api_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("public_url", &self.public_url)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("default_room", &self.default_room)
            .field("default_identity", &self.default_identity)
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "persona_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    3000
}

fn default_agent_timeout_secs() -> u64 {
    15
}

fn default_token_ttl_seconds() -> u64 {
    36000
}

fn default_room() -> String {
    "persona-demo".to_string()
}

fn default_identity() -> String {
    "guest".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            timeout_secs: default_agent_timeout_secs(),
        }
    }
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            public_url: None,
            token_ttl_seconds: default_token_ttl_seconds(),
            default_room: default_room(),
            default_identity: default_identity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `PERSONA_HOST` overrides `server.host`
/// - `PERSONA_PORT` overrides `server.port`
/// - `PERSONA_AGENT_BACKEND_URL` overrides `agent.backend_url`
/// - `PERSONA_AGENT_TIMEOUT_SECS` overrides `agent.timeout_secs`
/// - `PERSONA_LIVEKIT_API_KEY` overrides `livekit.api_key`
/// - `PERSONA_LIVEKIT_API_SECRET` overrides `livekit.api_secret`
/// - `PERSONA_LIVEKIT_URL` overrides `livekit.public_url`
/// - `PERSONA_TOKEN_TTL_SECONDS` overrides `livekit.token_ttl_seconds`
/// - `PERSONA_LOG_LEVEL` overrides `logging.level`
/// - `PERSONA_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(host) = std::env::var("PERSONA_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("PERSONA_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Ok(backend_url) = std::env::var("PERSONA_AGENT_BACKEND_URL") {
        if !backend_url.trim().is_empty() {
            config.agent.backend_url = Some(backend_url);
        }
    }
    if let Ok(timeout) = std::env::var("PERSONA_AGENT_TIMEOUT_SECS") {
        if let Ok(parsed) = timeout.parse() {
            config.agent.timeout_secs = parsed;
        }
    }
    if let Ok(api_key) = std::env::var("PERSONA_LIVEKIT_API_KEY") {
        if !api_key.trim().is_empty() {
            config.livekit.api_key = Some(api_key);
        }
    }
    if let Ok(api_secret) = std::env::var("PERSONA_LIVEKIT_API_SECRET") {
        if !api_secret.trim().is_empty() {
            config.livekit.api_secret = Some(api_secret);
        }
    }
    if let Ok(public_url) = std::env::var("PERSONA_LIVEKIT_URL") {
        if !public_url.trim().is_empty() {
            config.livekit.public_url = Some(public_url);
        }
    }
    if let Ok(ttl) = std::env::var("PERSONA_TOKEN_TTL_SECONDS") {
        if let Ok(parsed) = ttl.parse() {
            config.livekit.token_ttl_seconds = parsed;
        }
    }
    if let Ok(level) = std::env::var("PERSONA_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("PERSONA_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_required_values_unset() {
        let config = Config::default();
        assert!(config.agent.backend_url.is_none());
        assert!(config.livekit.api_key.is_none());
        assert!(config.livekit.api_secret.is_none());
        assert!(config.livekit.public_url.is_none());
        assert_eq!(config.agent.timeout_secs, 15);
        assert_eq!(config.livekit.token_ttl_seconds, 36000);
        assert_eq!(config.livekit.default_room, "persona-demo");
        assert_eq!(config.livekit.default_identity, "guest");
    }

    #[test]
    fn parses_full_toml() {
        let toml_str = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [agent]
            backend_url = "https://agent.example.com"
            timeout_secs = 5

            [livekit]
            api_key = "key"
            api_secret = "secret"
            public_url = "wss://livekit.example.com"
            default_room = "lobby"

            [logging]
            level = "debug"
            json = true
        "#;

        let config: Config = toml::from_str(toml_str).expect("parse TOML");
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.agent.backend_url.as_deref(),
            Some("https://agent.example.com")
        );
        assert_eq!(config.agent.timeout_secs, 5);
        assert_eq!(config.livekit.api_key.as_deref(), Some("key"));
        assert_eq!(config.livekit.default_room, "lobby");
        assert_eq!(config.livekit.default_identity, "guest");
        assert!(config.logging.json);
    }

    #[test]
    fn debug_output_redacts_secret() {
        let mut config = LiveKitConfig::default();
        config.api_secret = Some("super-secret".to_string());
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("REDACTED"));
    }
}
