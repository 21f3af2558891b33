//! Structured error handling for provider operations.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while managing resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The remote resource does not exist.
    RemoteNotFound,
    /// The remote service rejected the submitted values.
    RemoteValidation,
    /// The remote service rejected the credentials.
    RemoteAuth,
    /// The request did not complete (connection, timeout, transfer).
    RemoteTransport,
    /// The remote service failed in any other way.
    RemoteService,
    /// Local state failed validation; no remote call was made.
    LocalPrecondition,
    /// The caller cancelled the operation.
    Cancelled,
    /// The provider or registry is misconfigured.
    Configuration,
}

impl ErrorKind {
    /// Short, user-facing summary for diagnostics of this kind.
    pub const fn summary(&self) -> &'static str {
        match self {
            Self::RemoteNotFound => "Webhook not found",
            Self::RemoteValidation => "SparkPost rejected the webhook",
            Self::RemoteAuth => "SparkPost authentication failed",
            Self::RemoteTransport => "SparkPost request failed",
            Self::RemoteService => "SparkPost returned an error",
            Self::LocalPrecondition => "Invalid configuration",
            Self::Cancelled => "Operation cancelled",
            Self::Configuration => "Provider misconfigured",
        }
    }

    /// Returns `true` for errors reported by the remote service.
    pub const fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::RemoteNotFound
                | Self::RemoteValidation
                | Self::RemoteAuth
                | Self::RemoteTransport
                | Self::RemoteService
        )
    }
}

/// Structured error type with classification and attribute tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<String>,
    /// Attribute the error refers to, if any.
    pub attribute: Option<String>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            attribute: None,
            source: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self {
            kind,
            message: None,
            attribute: None,
            source: Some(source.into()),
        }
    }

    /// Creates a local precondition error for an attribute.
    pub fn precondition(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LocalPrecondition)
            .with_attribute(attribute)
            .with_message(message)
    }

    /// Creates a cancellation error for the named operation.
    pub fn cancelled(operation: &str) -> Self {
        Self::new(ErrorKind::Cancelled).with_message(format!("{operation} was cancelled"))
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration).with_message(message)
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the attribute this error refers to.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl From<sparkform_client::Error> for Error {
    fn from(error: sparkform_client::Error) -> Self {
        use sparkform_client::ErrorKind as Remote;

        let kind = match error.kind() {
            Remote::NotFound => ErrorKind::RemoteNotFound,
            Remote::Validation => ErrorKind::RemoteValidation,
            Remote::Authentication => ErrorKind::RemoteAuth,
            Remote::Transport => ErrorKind::RemoteTransport,
            Remote::Service | Remote::InvalidResponse => ErrorKind::RemoteService,
            Remote::Configuration => ErrorKind::Configuration,
        };

        Self::new(kind)
            .with_message(error.to_string())
            .with_source(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorKind::LocalPrecondition)
            .with_message(format!("state does not match the schema: {error}"))
            .with_source(error)
    }
}
