//! Configuration for Scry.
//!
//! Values resolve in order: built-in defaults, then
//! `~/.config/scry/config.toml` (if present), then environment variables
//! (`SCRY_ENDPOINT`, `SCRY_DISPLAY_WIDTH`).

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Result, ScryError};

/// The remote analysis endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://app.sourceu.ai/api/analyze";

/// Bounded width the snapshot is displayed at, in display units.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 300;

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct ScryConfig {
    /// URL of the remote analysis endpoint
    pub endpoint: String,
    /// Maximum displayed snapshot width; aspect ratio is preserved
    pub display_width: u32,
}

impl Default for ScryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            display_width: DEFAULT_DISPLAY_WIDTH,
        }
    }
}

/// On-disk configuration file shape; every field is optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    endpoint: Option<String>,
    display_width: Option<u32>,
}

impl ScryConfig {
    /// Loads the configuration from file and environment.
    pub fn load() -> Result<Self> {
        let file = match config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                toml::from_str(&content)?
            }
            _ => ConfigFile::default(),
        };

        Self::from_sources(
            file,
            std::env::var("SCRY_ENDPOINT").ok(),
            std::env::var("SCRY_DISPLAY_WIDTH").ok(),
        )
    }

    fn from_sources(
        file: ConfigFile,
        endpoint_env: Option<String>,
        display_width_env: Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(endpoint) = file.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(width) = file.display_width {
            config.display_width = width;
        }

        if let Some(endpoint) = endpoint_env {
            config.endpoint = endpoint;
        }
        if let Some(width) = display_width_env {
            config.display_width = width.parse().map_err(|_| {
                ScryError::config(format!("SCRY_DISPLAY_WIDTH is not a number: {width}"))
            })?;
        }

        if config.display_width == 0 {
            return Err(ScryError::config("display width must be at least 1"));
        }

        Ok(config)
    }
}

/// Returns the path to the configuration file: ~/.config/scry/config.toml
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("scry").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScryConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.display_width, 300);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file: ConfigFile =
            toml::from_str("endpoint = \"http://localhost:9000/analyze\"\ndisplay_width = 420")
                .unwrap();
        let config = ScryConfig::from_sources(file, None, None).unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000/analyze");
        assert_eq!(config.display_width, 420);
    }

    #[test]
    fn test_env_overrides_file() {
        let file: ConfigFile = toml::from_str("endpoint = \"http://from-file/\"").unwrap();
        let config = ScryConfig::from_sources(
            file,
            Some("http://from-env/".to_string()),
            Some("150".to_string()),
        )
        .unwrap();
        assert_eq!(config.endpoint, "http://from-env/");
        assert_eq!(config.display_width, 150);
    }

    #[test]
    fn test_invalid_width_is_an_error() {
        let config =
            ScryConfig::from_sources(ConfigFile::default(), None, Some("wide".to_string()));
        assert!(config.is_err());

        let config = ScryConfig::from_sources(ConfigFile::default(), None, Some("0".to_string()));
        assert!(config.is_err());
    }
}
