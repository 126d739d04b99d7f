//! Error types for the Restwire core library
//!
//! This module defines the crate-level error used by configuration and
//! construction code, using thiserror for ergonomic error definitions and
//! anyhow for flexible error contexts. Per-request failures are reported as
//! [`HttpError`](crate::http::HttpError) and wrapped here only when they
//! cross into code that deals in the crate-level error.

use thiserror::Error;

use crate::http::HttpError;

/// Main error type for Restwire operations
#[derive(Error, Debug)]
pub enum Error {
    /// A request failed at the transport or server level
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Credential store errors (token file present but unreadable)
    #[error("Credential error: {message}")]
    Credential {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error without an underlying cause
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// The HTTP error, if this error came from a request
    pub fn as_http(&self) -> Option<&HttpError> {
        match self {
            Error::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::NetworkErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::configuration("base URL is empty");
        assert_eq!(err.to_string(), "Configuration error: base URL is empty");
    }

    #[test]
    fn test_http_error_is_transparent() {
        let http = HttpError::Network {
            kind: NetworkErrorKind::Connect,
            message: "connection refused".to_string(),
        };
        let expected = http.to_string();
        let err = Error::from(http);

        assert_eq!(err.to_string(), expected);
        assert!(err.as_http().is_some());
    }

    #[test]
    fn test_json_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json { .. }));
        assert!(err.as_http().is_none());
    }
}
