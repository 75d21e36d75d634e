//! Base error types for packwise
//!
//! This module provides the foundation error types that all crates can use.

use thiserror::Error;

/// Error kind the host runtime recognizes as its own
///
/// The host renders these as user-facing messages instead of internal
/// failures, so they carry nothing but the message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HostError {
    message: String,
}

impl HostError {
    /// Name of the error kind as reported by the host
    pub const KIND: &'static str = "ServerlessError";

    /// Create a host error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human readable message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The host error kind
    #[must_use]
    pub fn kind(&self) -> &'static str {
        Self::KIND
    }
}

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure constructed through the host error factory
    #[error(transparent)]
    Host(#[from] HostError),

    /// Failure produced by a capability operation, passed through untouched
    #[error(transparent)]
    Capability(Box<dyn std::error::Error + Send + Sync>),

    /// A pipeline step named an operation that no capability provides
    #[error("No capability provides operation '{operation}'")]
    MissingOperation { operation: String },

    /// Operation name not known to the engine
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Source extension could not be activated
    #[error("Failed to activate extension '{extension}': {reason}")]
    ExtensionActivation { extension: String, reason: String },

    /// Host command path does not exist in the command tree
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Required command option was not supplied
    #[error("Missing required option '--{option}' for command '{command}'")]
    MissingOption { command: String, option: String },

    /// Service configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Wrap a capability failure without altering it
    pub fn capability<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        Self::Capability(Box::new(err))
    }

    /// Host error carried by this error, if any
    #[must_use]
    pub fn as_host(&self) -> Option<&HostError> {
        match self {
            Self::Host(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("bundle failed with code {0}")]
    struct BundleFailed(i32);

    #[test]
    fn test_host_error_kind_and_message() {
        let err = HostError::new("Use another command");
        assert_eq!(err.kind(), "ServerlessError");
        assert_eq!(err.message(), "Use another command");
        assert_eq!(err.to_string(), "Use another command");
    }

    #[test]
    fn test_capability_error_is_transparent() {
        let err = Error::capability(BundleFailed(2));
        assert_eq!(err.to_string(), "bundle failed with code 2");

        let Error::Capability(inner) = &err else {
            panic!("expected capability error");
        };
        assert_eq!(inner.downcast_ref::<BundleFailed>().unwrap().0, 2);
    }

    #[test]
    fn test_as_host() {
        let err: Error = HostError::new("nope").into();
        assert_eq!(err.as_host().unwrap().message(), "nope");
        assert!(Error::Message("other".to_string()).as_host().is_none());
    }

    #[test]
    fn test_missing_option_message() {
        let err = Error::MissingOption {
            command: "webpack watch".to_string(),
            option: "function".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required option '--function' for command 'webpack watch'"
        );
    }
}
