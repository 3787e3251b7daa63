//! Configuration management for student-tui.
//!
//! This module handles loading and validating user configuration. The
//! configuration lives in a TOML file in the platform config directory and
//! is entirely optional: a missing file yields the defaults.

mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

pub use settings::Settings;

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "STUDENT_API_URL";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The configuration file could not be read.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration file is not valid TOML.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The full application configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Application settings.
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// Falls back to defaults when the file does not exist. The
    /// `STUDENT_API_URL` environment variable overrides the base URL.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load the configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            debug!(path = %path.display(), "Reading configuration file");
            let content = fs::read_to_string(path)?;
            toml::from_str::<Config>(&content)?
        } else {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.settings.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                info!(base_url = %url, "Base URL overridden from environment");
                self.settings.base_url = url.trim().to_string();
            }
        }
    }

    /// Get the default configuration directory.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("student-tui"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Get the default configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        std::env::remove_var(BASE_URL_ENV);
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_full_file_loads() {
        std::env::remove_var(BASE_URL_ENV);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[settings]\nbase_url = \"https://school.example.com\"\nrequest_timeout_secs = 10\n",
        )
        .unwrap();

        let mut expected = Config::default();
        expected.settings.base_url = "https://school.example.com".to_string();
        expected.settings.request_timeout_secs = Some(10);
        assert_eq!(Config::load_from(&path).unwrap(), expected);
    }

    #[test]
    #[serial]
    fn test_partial_file_fills_defaults() {
        std::env::remove_var(BASE_URL_ENV);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\nbase_url = \"http://10.0.0.5:9000\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.settings.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.settings.redirect_delay_ms, 1000);
        assert_eq!(config.settings.delete_notice_ms, 3000);
    }

    #[test]
    #[serial]
    fn test_invalid_toml_rejected() {
        std::env::remove_var(BASE_URL_ENV);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "settings = [[[").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    #[serial]
    fn test_invalid_url_rejected() {
        std::env::remove_var(BASE_URL_ENV);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\nbase_url = \"localhost\"\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    #[serial]
    fn test_env_override_base_url() {
        let dir = TempDir::new().unwrap();
        std::env::set_var(BASE_URL_ENV, "https://override.example.com");
        let config = Config::load_from(&dir.path().join("config.toml"));
        std::env::remove_var(BASE_URL_ENV);

        assert_eq!(
            config.unwrap().settings.base_url,
            "https://override.example.com"
        );
    }

    #[test]
    #[serial]
    fn test_blank_env_override_ignored() {
        let dir = TempDir::new().unwrap();
        std::env::set_var(BASE_URL_ENV, "   ");
        let config = Config::load_from(&dir.path().join("config.toml"));
        std::env::remove_var(BASE_URL_ENV);

        assert_eq!(config.unwrap().settings.base_url, Settings::default().base_url);
    }

    #[test]
    fn test_config_path_file_name() {
        if let Ok(path) = Config::config_path() {
            assert!(path.ends_with("student-tui/config.toml"));
        }
    }
}
