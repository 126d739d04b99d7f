//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use restwire_core::HttpError;
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from restwire-core outside of a request
    #[error("Core error: {0}")]
    Core(#[from] restwire_core::Error),

    /// A request failed
    #[error("{0}")]
    Http(#[from] HttpError),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument value
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(restwire_core::Error::Http(e)) | Self::Http(e) => http_exit_code(e),
            Self::Core(restwire_core::Error::Credential { .. }) => 4,
            Self::Core(_) => 2,
            Self::FileNotFound { .. } => 3,
            Self::Config(_) => 5,
            Self::InvalidArgs(_) => 6,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::TomlDe(_) | Self::TomlSer(_) => 14,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

fn http_exit_code(error: &HttpError) -> i32 {
    match error {
        HttpError::Network { .. } => 10,
        HttpError::Status(_) => 20,
        HttpError::Decode { .. } => 21,
        HttpError::InvalidRequest { .. } => 22,
    }
}

/// Format an error for display to the user.
///
/// Server errors include the status line and the response body so the
/// caller can see what the server said.
pub fn format_error(error: &Error, use_color: bool) -> String {
    let headline = if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    };

    let http = match error {
        Error::Http(e) | Error::Core(restwire_core::Error::Http(e)) => Some(e),
        _ => None,
    };

    match http.and_then(|e| e.response()) {
        Some(response) if !response.data.is_empty() => {
            let body = crate::logging::redaction::redact_sensitive(&response.text());
            format!("{}\n{}", headline, body)
        }
        _ => headline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restwire_core::http::{NetworkErrorKind, RawResponse, StatusCode};

    fn status_error(status: StatusCode, body: &'static str) -> Error {
        Error::Http(HttpError::Status(RawResponse {
            status,
            headers: Default::default(),
            data: body.as_bytes().to_vec().into(),
        }))
    }

    #[test]
    fn test_exit_codes_distinguish_failures() {
        let network = Error::Http(HttpError::Network {
            kind: NetworkErrorKind::Connect,
            message: "refused".to_string(),
        });
        assert_eq!(network.exit_code(), 10);
        assert_eq!(status_error(StatusCode::NOT_FOUND, "").exit_code(), 20);
        assert_eq!(Error::config("x").exit_code(), 5);
        assert_eq!(
            Error::Core(restwire_core::Error::configuration("x")).exit_code(),
            2
        );
    }

    #[test]
    fn test_format_error_includes_body() {
        let err = status_error(StatusCode::CONFLICT, r#"{"message":"duplicate"}"#);
        let formatted = format_error(&err, false);
        assert!(formatted.starts_with("Error: HTTP error [409 Conflict]"));
        assert!(formatted.contains("duplicate"));
    }

    #[test]
    fn test_format_error_without_response() {
        let err = Error::invalid_args("bad json");
        assert_eq!(format_error(&err, false), "Error: Invalid arguments: bad json");
        assert!(err.should_show_help());
    }
}
