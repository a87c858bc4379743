use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    NotFound(String),
    ValidationError(String),
    ParseError(String),
    SecurityError(String),
    IoError(String),
    ConfigError(String),
    /// The request never produced an HTTP response.
    Transport(String),
    /// The backend answered with a non-success status other than 401.
    Http { status: u16, body: String },
    /// The backend rejected the session token.
    Unauthorized,
    /// A console action failed; `operation` names it for the notification.
    Operation { operation: String, reason: String },
}

impl AppError {
    pub fn operation(operation: &str, reason: impl fmt::Display) -> Self {
        AppError::Operation {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::SecurityError(msg) => write!(f, "Security error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::Transport(msg) => write!(f, "Network error: {}", msg),
            AppError::Http { status, body } => {
                if body.trim().is_empty() {
                    write!(f, "Request failed with status {}", status)
                } else {
                    write!(f, "Request failed with status {}: {}", status, body)
                }
            }
            AppError::Unauthorized => write!(f, "Session is not authorized"),
            AppError::Operation { operation, reason } => {
                write!(f, "Failed to {}: {}", operation, reason)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_message_names_the_operation() {
        let err = AppError::operation("run test cases", "One or more test cases failed");
        assert_eq!(
            err.to_string(),
            "Failed to run test cases: One or more test cases failed"
        );
    }

    #[test]
    fn test_http_error_without_body() {
        let err = AppError::Http {
            status: 500,
            body: "  ".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[test]
    fn test_unauthorized_flag() {
        assert!(AppError::Unauthorized.is_unauthorized());
        assert!(!AppError::NotFound("x".into()).is_unauthorized());
    }
}
