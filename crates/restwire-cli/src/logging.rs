//! Logging utilities for the Restwire CLI
//!
//! This module provides:
//! - Request ID generation and tracking
//! - Sensitive data redaction
//! - Performance timing spans
//! - Structured logging setup (console or JSON)

use crate::error::{Error, Result};
use is_terminal::IsTerminal;
use std::sync::OnceLock;
use tracing::{field, Span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Global request ID for the current session
static REQUEST_ID: OnceLock<String> = OnceLock::new();

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Output format: compact, full, json
    pub format: LogFormat,
    /// Enable ANSI colors on stderr
    pub console: bool,
    /// Include thread IDs
    pub thread_ids: bool,
    /// Include file and line numbers
    pub source_location: bool,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    /// Compact format for production
    Compact,
    /// Full format with all details
    Full,
    /// JSON structured format
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "compact" => Some(LogFormat::Compact),
            "full" => Some(LogFormat::Full),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            console: true,
            thread_ids: false,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let mut config = Self::default();

        match verbosity {
            0 => {}
            1 => {
                config.level = "info".to_string();
            }
            2 => {
                config.level = "debug".to_string();
                config.source_location = true;
            }
            _ => {
                config.level = "trace".to_string();
                config.format = LogFormat::Full;
                config.source_location = true;
                config.thread_ids = true;
            }
        }

        config
    }

    /// Apply settings from the configuration file; flags still win
    pub fn merge_with_file(&mut self, file: &crate::config::LoggingConfig, verbosity: u8) {
        if verbosity == 0 {
            if let Some(level) = &file.level {
                self.level = level.clone();
            }
        }
        if let Some(format) = file.format.as_deref().and_then(LogFormat::parse) {
            self.format = format;
        }
    }

    /// Apply environment overrides
    pub fn merge_with_env(&mut self) {
        // RUST_LOG takes precedence
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            self.level = rust_log;
        }

        if let Ok(format) = std::env::var("RESTWIRE_LOG_FORMAT") {
            match LogFormat::parse(&format) {
                Some(parsed) => self.format = parsed,
                None => eprintln!("Invalid log format: {}, using default", format),
            }
        }
    }
}

/// Initialize the global logging system
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::other(format!("Invalid log filter '{}': {}", config.level, e)))?;
    let ansi = config.console && std::io::stderr().is_terminal();

    // Separate arms keep the subscriber types apart
    let installed = match config.format {
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(ansi)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .compact()
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(false)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .json()
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Full => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(ansi)
                .with_thread_ids(config.thread_ids)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    };
    installed.map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;

    let request_id = generate_request_id();
    REQUEST_ID.set(request_id.clone()).map_err(|_| {
        Error::other("Failed to set request ID - request tracking may not work correctly")
    })?;

    tracing::debug!(
        request_id = %request_id,
        config = ?config,
        "Logging system initialized"
    );

    Ok(())
}

/// Generate a unique request ID for this session
pub fn generate_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

/// Get the current request ID
pub fn current_request_id() -> Option<&'static str> {
    REQUEST_ID.get().map(|s| s.as_str())
}

/// Create a span with request ID and timing
pub fn create_operation_span(operation: &str, details: Option<&str>) -> Span {
    tracing::info_span!(
        "operation",
        operation = operation,
        request_id = current_request_id().unwrap_or("unknown"),
        details = details.unwrap_or(""),
        duration_ms = field::Empty,
    )
}

/// Sensitive data redaction utilities
pub mod redaction {
    use regex::Regex;
    use std::sync::OnceLock;

    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    static PASSWORD_REGEX: OnceLock<Regex> = OnceLock::new();
    static AUTH_HEADER_REGEX: OnceLock<Regex> = OnceLock::new();

    fn token_regex() -> &'static Regex {
        TOKEN_REGEX.get_or_init(|| {
            Regex::new(r#"(?i)("?(?:access_?token|token)"?)\s*[=:]\s*"?([a-zA-Z0-9_.\-]{6,})"?"#)
                .expect("valid token pattern")
        })
    }

    fn password_regex() -> &'static Regex {
        PASSWORD_REGEX.get_or_init(|| {
            Regex::new(r#"(?i)("?(?:password|passwd|pwd)"?)\s*[=:]\s*"?([^\s",}]{1,})"?"#)
                .expect("valid password pattern")
        })
    }

    fn auth_header_regex() -> &'static Regex {
        AUTH_HEADER_REGEX.get_or_init(|| {
            Regex::new(r#"(?i)\b(bearer|basic)\s+[a-zA-Z0-9_.=+/\-]+"#).expect("valid header pattern")
        })
    }

    /// Redact sensitive information from a string
    pub fn redact_sensitive(input: &str) -> String {
        let result = auth_header_regex().replace_all(input, "$1 ***");
        let result = token_regex().replace_all(&result, "$1=***");
        let result = password_regex().replace_all(&result, "$1=***");
        result.into_owned()
    }

    /// Redact sensitive information from JSON values
    pub fn redact_json_value(value: &mut serde_json::Value) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, val) in map.iter_mut() {
                    if is_sensitive_key(key) {
                        *val = serde_json::Value::String("***".to_string());
                    } else {
                        redact_json_value(val);
                    }
                }
            }
            serde_json::Value::Array(arr) => {
                for item in arr.iter_mut() {
                    redact_json_value(item);
                }
            }
            serde_json::Value::String(s) => {
                *s = redact_sensitive(s);
            }
            _ => {}
        }
    }

    /// Check if a JSON key contains sensitive information
    fn is_sensitive_key(key: &str) -> bool {
        let key_lower = key.to_lowercase();
        key_lower.contains("token")
            || key_lower.contains("password")
            || key_lower.contains("passwd")
            || key_lower.contains("secret")
            || key_lower.contains("authorization")
    }
}

/// Performance timing utilities
pub mod timing {
    use std::time::Instant;
    use tracing::Span;

    /// A timer that automatically logs duration when dropped
    pub struct Timer {
        start: Instant,
        span: Span,
        operation: String,
    }

    impl Timer {
        pub fn new(operation: &str) -> Self {
            Self {
                start: Instant::now(),
                span: super::create_operation_span(operation, None),
                operation: operation.to_string(),
            }
        }

        pub fn with_details(operation: &str, details: &str) -> Self {
            Self {
                start: Instant::now(),
                span: super::create_operation_span(operation, Some(details)),
                operation: operation.to_string(),
            }
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            let duration = self.start.elapsed();
            self.span.record("duration_ms", duration.as_millis() as u64);

            tracing::debug!(
                operation = %self.operation,
                duration_ms = duration.as_millis() as u64,
                "Operation completed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction() {
        let input = "token=abcdef123456 password=secret123 Authorization: Bearer eyJhbGciOi.x.y";
        let redacted = redaction::redact_sensitive(input);
        assert!(redacted.contains("token=***"));
        assert!(redacted.contains("password=***"));
        assert!(redacted.contains("Bearer ***"));
        assert!(!redacted.contains("abcdef123456"));
        assert!(!redacted.contains("secret123"));
        assert!(!redacted.contains("eyJhbGciOi"));
    }

    #[test]
    fn test_json_redaction() {
        let mut value = serde_json::json!({
            "token": "issued-token",
            "email": "a@b.com",
            "session": {
                "accessToken": "nested"
            }
        });

        redaction::redact_json_value(&mut value);

        assert_eq!(value["token"], "***");
        assert_eq!(value["email"], "a@b.com");
        assert_eq!(value["session"]["accessToken"], "***");
    }

    #[test]
    fn test_logging_config_from_verbosity() {
        let config = LoggingConfig::from_verbosity(0);
        assert_eq!(config.level, "warn");
        assert!(!config.source_location);

        let config = LoggingConfig::from_verbosity(2);
        assert_eq!(config.level, "debug");
        assert!(config.source_location);

        let config = LoggingConfig::from_verbosity(3);
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, LogFormat::Full);
        assert!(config.thread_ids);
    }

    #[test]
    fn test_merge_with_file() {
        let file = crate::config::LoggingConfig {
            level: Some("info".to_string()),
            format: Some("json".to_string()),
        };

        let mut config = LoggingConfig::from_verbosity(0);
        config.merge_with_file(&file, 0);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Json);

        let mut config = LoggingConfig::from_verbosity(2);
        config.merge_with_file(&file, 2);
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_request_id_format() {
        let id = generate_request_id();
        assert!(id.starts_with("req_"));
        assert_eq!(id.len(), 4 + 32);
    }
}
