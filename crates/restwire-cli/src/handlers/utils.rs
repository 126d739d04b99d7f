//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use restwire_core::{ApiResponse, FileCredentialStore, ResourceClient};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Build a client reading its token from the configured token file
pub fn build_client(config: &Config) -> Result<ResourceClient<FileCredentialStore>> {
    let client_config = config.client_config()?;
    let store = FileCredentialStore::new(&config.credentials.token_file);
    tracing::debug!(
        base_url = %client_config.base_url,
        token_file = %config.credentials.token_file.display(),
        "Building resource client"
    );
    Ok(ResourceClient::new(client_config, store)?)
}

/// Parse a JSON argument given inline or as `@path`
pub fn parse_json_arg(arg: &str) -> Result<Value> {
    let (content, source) = match arg.strip_prefix('@') {
        Some(path) => {
            let path = Path::new(path);
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            (fs::read_to_string(path)?, path.display().to_string())
        }
        None => (arg.to_string(), "argument".to_string()),
    };

    serde_json::from_str(&content)
        .map_err(|e| Error::invalid_args(format!("Invalid JSON in {}: {}", source, e)))
}

/// Write a token to disk, owner-readable only where supported
pub fn save_token(path: &Path, token: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;

    // mode() only applies on creation; tighten a file left by an older login
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(token.as_bytes())?;
    Ok(())
}

/// Print the status line and the decoded body
pub fn print_response(output: &mut OutputWriter, response: &ApiResponse<Value>) -> Result<()> {
    output.info(&format!("{}", response.status))?;
    if !response.is_no_content() {
        output.data(&response.data)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use restwire_core::CredentialStore;

    #[test]
    fn test_parse_inline_json() {
        let value = parse_json_arg(r#"{"total": 100}"#).unwrap();
        assert_eq!(value["total"], 100);
    }

    #[test]
    fn test_parse_json_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        fs::write(&path, r#"[1, 2, 3]"#).unwrap();

        let value = parse_json_arg(&format!("@{}", path.display())).unwrap();
        assert_eq!(value, serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(parse_json_arg("{oops"), Err(Error::InvalidArgs(_))));
        assert!(matches!(
            parse_json_arg("@/no/such/payload.json"),
            Err(Error::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_saved_token_is_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("token");

        save_token(&path, "issued-token").unwrap();

        let store = FileCredentialStore::new(&path);
        assert_eq!(store.get_token().as_deref(), Some("issued-token"));
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_token_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "stale").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        save_token(&path, "fresh").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");

        let new_path = dir.path().join("new-token");
        save_token(&new_path, "issued").unwrap();
        let mode = fs::metadata(&new_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_build_client_requires_base_url() {
        assert!(matches!(build_client(&Config::default()), Err(Error::Config(_))));
    }
}
