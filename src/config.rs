//! Configuration loading.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Remote generation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the generation service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connection timeout in seconds (default: 5). There is deliberately no
    /// request timeout: a superseding trigger, not a timer, retires a hung
    /// request.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl ServiceConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.connect_timeout_seconds))
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_connect_timeout() -> u32 {
    5
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/sitewright/config.toml` on Unix/macOS, or equivalent on
    /// other platforms via `dirs::config_dir()`. Falls back to the current
    /// directory if no config dir is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("sitewright").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file yields `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/sitewright.toml")).unwrap();
        assert_eq!(config.service.base_url, "http://localhost:8000");
        assert_eq!(config.service.connect_timeout_seconds, 5);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config =
            toml::from_str("[service]\nbase_url = \"https://gen.example\"\n").unwrap();
        assert_eq!(config.service.base_url, "https://gen.example");
        assert_eq!(config.service.connect_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn load_from_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[service]\nbase_url = \"http://127.0.0.1:9\"\nconnect_timeout_seconds = 1\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.service.base_url, "http://127.0.0.1:9");
        assert_eq!(config.service.connect_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "service = not toml").unwrap();

        match Config::load_from(&path) {
            Err(ConfigError::ParseError { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
