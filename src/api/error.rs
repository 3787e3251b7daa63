//! API error types for the student service client.

use thiserror::Error;

/// Errors that can occur when talking to the student management service.
///
/// The UI treats every variant the same way; the distinction only matters
/// for logging.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The backend rejected the request (4xx other than 404).
    #[error("Request rejected: {0}")]
    ClientError(String),

    /// Backend server error.
    #[error("Student service error: {0}")]
    ServerError(String),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            404 => ApiError::NotFound(context.to_string()),
            400..=499 => ApiError::ClientError(format!("HTTP {}: {}", status, context)),
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::ServerError(format!("Unexpected HTTP {}: {}", status, context)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_from_status_404() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "student 42");
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "student 42"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_error_from_status_400() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "bad body");
        assert!(matches!(err, ApiError::ClientError(_)));
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn test_error_from_status_500() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "test");
        assert!(matches!(err, ApiError::ServerError(_)));
    }

    #[test]
    fn test_error_from_status_unexpected() {
        let err = ApiError::from_status(StatusCode::PERMANENT_REDIRECT, "moved");
        match err {
            ApiError::ServerError(msg) => assert!(msg.starts_with("Unexpected HTTP")),
            _ => panic!("Expected ServerError"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::NotFound("student 7".to_string());
        assert_eq!(err.to_string(), "Resource not found: student 7");

        let err = ApiError::InvalidUrl("ftp://x".to_string());
        assert_eq!(err.to_string(), "Invalid URL: ftp://x");
    }
}
