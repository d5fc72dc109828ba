//! Error types for the user administration client

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the client library
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Explicit configuration file does not exist
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Base URL could not be assembled or parsed
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Network-level failure, passed through unchanged
    #[error("Transport error: {0}")]
    Transport(Box<reqwest::Error>),

    /// Server answered with a non-2xx status
    #[error("HTTP {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status {
        /// Response status
        status: StatusCode,
        /// Message extracted from the response body, if any
        message: Option<String>,
    },

    /// Response body could not be decoded
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// Record carries neither a uuid nor a legacy id
    #[error("User record has no identifier")]
    MissingIdentifier,

    /// A string could not be parsed as a user identifier
    #[error("Invalid user identifier: {0}")]
    InvalidUserId(String),
}

impl Error {
    /// HTTP status of a server error, if this is one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the server rejected the request as a duplicate (409)
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_detection() {
        let err = Error::Status {
            status: StatusCode::CONFLICT,
            message: Some("duplicate".to_string()),
        };
        assert!(err.is_conflict());
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));

        let err = Error::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert!(!err.is_conflict());
        assert!(!Error::MissingIdentifier.is_conflict());
    }

    #[test]
    fn test_status_display() {
        let err = Error::Status {
            status: StatusCode::NOT_FOUND,
            message: Some("User not found".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP 404 Not Found: User not found");

        let err = Error::Status {
            status: StatusCode::BAD_GATEWAY,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway");
    }
}
