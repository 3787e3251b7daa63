//! Application settings configuration.

use std::time::Duration;

use serde::Deserialize;

use super::{ConfigError, Result};

/// Application-wide settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Origin of the backend hosting the student management service.
    pub base_url: String,
    /// Per-request timeout in seconds. Unset means requests never time out.
    pub request_timeout_secs: Option<u64>,
    /// Delay before returning to the list after a student is created.
    pub redirect_delay_ms: u64,
    /// How long the "deleted" notice stays on screen.
    pub delete_notice_ms: u64,
    /// Event loop tick rate.
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: None,
            redirect_delay_ms: 1000,
            delete_notice_ms: 3000,
            tick_rate_ms: 100,
        }
    }
}

impl Settings {
    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if the base URL is empty or
    /// lacks an http(s) scheme, or the tick rate is zero.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }

        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Post-create redirect delay as a duration.
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Delete notice lifetime as a duration.
    pub fn delete_notice(&self) -> Duration {
        Duration::from_millis(self.delete_notice_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_default_has_no_timeout() {
        assert_eq!(Settings::default().request_timeout(), None);
    }

    #[test]
    fn test_empty_url_rejected() {
        let settings = Settings {
            base_url: String::new(),
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_url_scheme_required() {
        let settings = Settings {
            base_url: "school.example.com".to_string(),
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("must start with http"));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let settings = Settings {
            tick_rate_ms: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_durations() {
        let settings = Settings {
            request_timeout_secs: Some(30),
            ..Default::default()
        };
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(settings.redirect_delay(), Duration::from_secs(1));
        assert_eq!(settings.delete_notice(), Duration::from_secs(3));
    }
}
