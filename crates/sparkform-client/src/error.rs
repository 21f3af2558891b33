//! Error types for SparkPost API operations.

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Result type for all SparkPost API operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of failures reported by the SparkPost API client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The requested resource does not exist.
    NotFound,
    /// The API rejected the request payload.
    Validation,
    /// The API key is missing, invalid or lacks permissions.
    Authentication,
    /// The request never produced a usable response.
    Transport,
    /// Any other non-success response from the API.
    Service,
    /// The response body could not be decoded.
    InvalidResponse,
    /// The client is misconfigured.
    Configuration,
}

/// Error returned by the SparkPost API client.
///
/// Remote failures keep the message reported by SparkPost so callers can
/// surface it to end users unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP 404 from the API.
    #[error("resource not found: {message}")]
    NotFound {
        /// Error message from the API
        message: String,
    },

    /// HTTP 400, 409 or 422 from the API.
    #[error("validation failed (status {status}): {message}")]
    Validation {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
        /// Optional error code from the API
        code: Option<String>,
    },

    /// HTTP 401 or 403 from the API.
    #[error("authentication failed (status {status}): {message}")]
    Authentication {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Connection, timeout or body transfer failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any other unsuccessful status.
    #[error("API error (status {status}): {message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
        /// Optional error code from the API
        code: Option<String>,
    },

    /// Invalid or malformed API response.
    #[error("invalid response: {message}")]
    InvalidResponse {
        /// Description of what's invalid
        message: String,
        /// Optional raw response body for debugging
        body: Option<String>,
    },

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },
}

impl Error {
    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(status: u16, message: impl Into<String>, code: Option<String>) -> Self {
        Self::Validation {
            status,
            message: message.into(),
            code,
        }
    }

    /// Create an authentication error.
    pub fn authentication(status: u16, message: impl Into<String>) -> Self {
        Self::Authentication {
            status,
            message: message.into(),
        }
    }

    /// Create a generic service error.
    pub fn service(status: u16, message: impl Into<String>, code: Option<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
            code,
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>, body: Option<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
            body,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classifies an unsuccessful HTTP status together with the decoded API message.
    pub fn from_status(status: u16, message: impl Into<String>, code: Option<String>) -> Self {
        match status {
            404 => Self::not_found(message),
            400 | 409 | 422 => Self::validation(status, message, code),
            401 | 403 => Self::authentication(status, message),
            _ => Self::service(status, message, code),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Service { .. } => ErrorKind::Service,
            Self::InvalidResponse { .. } => ErrorKind::InvalidResponse,
            Self::Config { .. } => ErrorKind::Configuration,
        }
    }

    /// Get the HTTP status code if the API answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Validation { status, .. }
            | Self::Authentication { status, .. }
            | Self::Service { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::InvalidResponse { .. } | Self::Config { .. } => None,
        }
    }

    /// Returns `true` if the remote resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the request timed out on the client side.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert_eq!(Error::from_status(404, "gone", None).kind(), ErrorKind::NotFound);
        assert_eq!(Error::from_status(400, "bad", None).kind(), ErrorKind::Validation);
        assert_eq!(Error::from_status(422, "bad", None).kind(), ErrorKind::Validation);
        assert_eq!(Error::from_status(409, "dup", None).kind(), ErrorKind::Validation);
        assert_eq!(Error::from_status(401, "key", None).kind(), ErrorKind::Authentication);
        assert_eq!(Error::from_status(403, "perm", None).kind(), ErrorKind::Authentication);
        assert_eq!(Error::from_status(429, "slow", None).kind(), ErrorKind::Service);
        assert_eq!(Error::from_status(503, "down", None).kind(), ErrorKind::Service);
    }

    #[test]
    fn test_display_keeps_remote_message() {
        let error = Error::from_status(422, "target: invalid port", Some("1300".into()));
        let display = error.to_string();
        assert!(display.contains("422"));
        assert!(display.contains("target: invalid port"));
    }

    #[test]
    fn test_status_code() {
        assert_eq!(Error::not_found("x").status_code(), Some(404));
        assert_eq!(Error::authentication(401, "x").status_code(), Some(401));
        assert_eq!(Error::config("x").status_code(), None);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(ErrorKind::from_str("not_found").unwrap(), ErrorKind::NotFound);
        assert_eq!(ErrorKind::NotFound.as_ref(), "not_found");
        assert!(ErrorKind::from_str("missing").is_err());
    }
}
