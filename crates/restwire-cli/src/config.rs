//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Environment variables and command-line arguments (applied by the caller)

use crate::error::{Error, Result};
use restwire_core::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API settings
    pub api: ApiConfig,

    /// Where the bearer token lives
    pub credentials: CredentialsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// API connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every resource path is joined onto
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Token storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// File holding the bearer token
    pub token_file: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            credentials: CredentialsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        let token_file = dirs::config_dir()
            .map(|d| d.join("restwire").join("token"))
            .unwrap_or_else(|| PathBuf::from(".restwire-token"));

        Self { token_file }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: None,
        }
    }
}

/// Serialization format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Yaml,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("toml") => FileFormat::Toml,
            _ => FileFormat::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, FileFormat::from_path(path))
    }

    fn parse(content: &str, format: FileFormat) -> Result<Self> {
        let config = match format {
            FileFormat::Yaml => serde_yaml::from_str(content)?,
            FileFormat::Toml => toml::from_str(content)?,
            FileFormat::Json => serde_json::from_str(content)?,
        };
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "Loaded configuration");
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to load config");
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Path of the user-level config file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("restwire").join("config.yaml"))
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".restwire.yaml"),
            PathBuf::from(".restwire.toml"),
            PathBuf::from(".restwire.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let restwire_dir = config_dir.join("restwire");
            paths.push(restwire_dir.join("config.yaml"));
            paths.push(restwire_dir.join("config.toml"));
            paths.push(restwire_dir.join("config.json"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".restwire.yaml"));
        }

        paths
    }

    /// Apply command-line and environment overrides (already merged by clap)
    pub fn apply_overrides(
        &mut self,
        base_url: Option<String>,
        token_file: Option<PathBuf>,
        timeout_secs: Option<u64>,
    ) {
        if base_url.is_some() {
            self.api.base_url = base_url;
        }
        if let Some(path) = token_file {
            self.credentials.token_file = path;
        }
        if timeout_secs.is_some() {
            self.api.timeout_secs = timeout_secs;
        }
    }

    /// Build the client configuration, failing when no base URL is set
    pub fn client_config(&self) -> Result<ClientConfig> {
        let base_url = self.api.base_url.clone().ok_or_else(|| {
            Error::config("No base URL configured. Set --base-url, RESTWIRE_BASE_URL or api.base_url")
        })?;

        let mut config = ClientConfig::new(base_url);
        config.timeout_secs = self.api.timeout_secs;
        config.validate()?;
        Ok(config)
    }

    /// Serialize in the format implied by the path's extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match FileFormat::from_path(path) {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
