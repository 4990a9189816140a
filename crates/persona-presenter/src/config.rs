use crate::error::PresenterError;
use serde::{Deserialize, Serialize};

fn default_idle_source() -> String {
    "/videos/idle.mp4".to_string()
}

fn default_talking_source() -> String {
    "/videos/talking.mp4".to_string()
}

/// Clip references for the two video slots.
///
/// Both default to the bundled assets so a presenter can be constructed with
/// `PresenterConfig::default()` and no further setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenterConfig {
    /// Clip shown while the agent is not speaking.
    #[serde(default = "default_idle_source")]
    pub idle_source: String,

    /// Clip shown while the agent is speaking.
    #[serde(default = "default_talking_source")]
    pub talking_source: String,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            idle_source: default_idle_source(),
            talking_source: default_talking_source(),
        }
    }
}

impl PresenterConfig {
    pub fn new(idle_source: impl Into<String>, talking_source: impl Into<String>) -> Self {
        Self {
            idle_source: idle_source.into(),
            talking_source: talking_source.into(),
        }
    }

    /// Validates the configuration. Checked once at presenter construction.
    pub fn validate(&self) -> Result<(), PresenterError> {
        if self.idle_source.trim().is_empty() {
            return Err(PresenterError::Config(
                "idle_source must not be empty".to_string(),
            ));
        }
        if self.talking_source.trim().is_empty() {
            return Err(PresenterError::Config(
                "talking_source must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_bundled_clips() {
        let config = PresenterConfig::default();
        assert_eq!(config.idle_source, "/videos/idle.mp4");
        assert_eq!(config.talking_source, "/videos/talking.mp4");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_source_is_rejected() {
        let config = PresenterConfig::new("", "/videos/talking.mp4");
        assert!(config.validate().is_err());

        let config = PresenterConfig::new("/videos/idle.mp4", "   ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let config: PresenterConfig =
            toml::from_str(r#"idle_source = "/videos/custom_idle.mp4""#).expect("parse TOML");
        assert_eq!(config.idle_source, "/videos/custom_idle.mp4");
        assert_eq!(config.talking_source, "/videos/talking.mp4");
    }
}
