//! Centralized error types for student-tui.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// Client-side validation failures on a student form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The age field holds text that is not an integer.
    #[error("Please enter a valid age.")]
    InvalidAge(String),
}

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Form validation errors.
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl AppError {
    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file is readable."
                        .to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::ClientError(_) => "The student service rejected the request.".to_string(),
                ApiError::ServerError(_) => {
                    "Student service error. Please try again later.".to_string()
                }
                ApiError::Network(_) => {
                    "Connection failed. Please check the service is reachable.".to_string()
                }
                ApiError::InvalidUrl(_) => "Invalid service URL in configuration.".to_string(),
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from the student service.".to_string()
                }
            },
            AppError::Validation(e) => e.to_string(),
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let app_err: AppError = ApiError::ServerError("boom".to_string()).into();
        assert!(matches!(app_err, AppError::Api(ApiError::ServerError(_))));
    }

    #[test]
    fn test_validation_message() {
        let err: AppError = ValidationError::InvalidAge("abc".to_string()).into();
        assert_eq!(err.user_message(), "Please enter a valid age.");
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Api(ApiError::NotFound("Student '9'".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("Student '9'"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError("bad url".to_string()));
        assert!(err.user_message().contains("bad url"));
    }
}
