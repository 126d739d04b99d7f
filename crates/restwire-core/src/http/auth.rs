//! Credential handling
//!
//! Two schemes are involved:
//! - HTTP Basic, used once to exchange an email and password for a user record
//! - Bearer tokens, read from a [`CredentialStore`] before every other request
//!
//! Nothing in this module writes a token. Persisting the token returned by
//! a login is left to whoever called [`CredentialProvider::authenticate`].

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::client::ClientConfig;
use crate::http::error::HttpError;
use crate::http::path::join_url;
use crate::http::response::{ApiResponse, RawResponse};
use crate::http::transport::AuthenticatedTransport;
use crate::http::HttpResult;
use crate::Result;

/// Path of the login endpoint relative to the base URL
pub const LOGIN_PATH: &str = "login";

/// Environment variable read by [`EnvCredentialStore::default`]
pub const TOKEN_ENV_VAR: &str = "RESTWIRE_USER_TOKEN";

/// Source of the bearer token attached to authenticated requests
pub trait CredentialStore: Send + Sync {
    /// Current token, read at call time
    fn get_token(&self) -> Option<String>;
}

impl<S: CredentialStore + ?Sized> CredentialStore for Arc<S> {
    fn get_token(&self) -> Option<String> {
        (**self).get_token()
    }
}

impl<S: CredentialStore + ?Sized> CredentialStore for Box<S> {
    fn get_token(&self) -> Option<String> {
        (**self).get_token()
    }
}

/// In-process token holder; other owners may replace the token at any time
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.into());
    }

    pub fn clear(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get_token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Reads the token from an environment variable on every call
#[derive(Debug, Clone)]
pub struct EnvCredentialStore {
    var_name: String,
}

impl EnvCredentialStore {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

impl Default for EnvCredentialStore {
    fn default() -> Self {
        Self::new(TOKEN_ENV_VAR)
    }
}

impl CredentialStore for EnvCredentialStore {
    fn get_token(&self) -> Option<String> {
        std::env::var(&self.var_name).ok().filter(|t| !t.is_empty())
    }
}

/// Reads the token from a file on every call.
///
/// Surrounding whitespace is ignored; a missing or empty file means no token.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the token, failing when the file exists but cannot be read.
    ///
    /// A missing or empty file is `Ok(None)`.
    pub fn read_token(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(crate::Error::Credential {
                message: format!("Cannot read token file {}", self.path.display()),
                source: Some(e.into()),
            }),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get_token(&self) -> Option<String> {
        match self.read_token() {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Token file is unreadable; sending without credentials");
                None
            }
        }
    }
}

/// `Basic base64("{email}:{password}")`
pub fn basic_auth_header(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", email, password)))
}

/// `Bearer {token}`
pub fn bearer_auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Body of the login request
#[derive(Debug, Clone, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// User record returned by a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub email: Option<String>,
    /// Bearer token to store for subsequent requests
    #[serde(default, alias = "accessToken", alias = "access_token")]
    pub token: Option<String>,
    /// Every other field, as sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Issues logins and hands out transports bound to the stored token
#[derive(Debug, Clone)]
pub struct CredentialProvider<S> {
    http: ReqwestClient,
    config: ClientConfig,
    store: S,
}

impl<S: CredentialStore> CredentialProvider<S> {
    /// Create a provider; the configuration is validated here and not re-read
    pub fn new(config: ClientConfig, store: S) -> Result<Self> {
        config.validate()?;

        let mut builder = ReqwestClient::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| crate::Error::Configuration {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(e.into()),
        })?;

        Ok(Self {
            http,
            config,
            store,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Log in with email and password, decoding the body as a [`User`]
    pub async fn authenticate(&self, email: &str, password: &str) -> HttpResult<ApiResponse<User>> {
        self.authenticate_as(email, password).await
    }

    /// Log in with email and password, decoding the body as `U`.
    ///
    /// A non-2xx answer fails with [`HttpError::Status`] holding the response
    /// as received. No answer at all fails with [`HttpError::Network`], whose
    /// [`HttpError::response`] is `None`.
    pub async fn authenticate_as<U: DeserializeOwned>(
        &self,
        email: &str,
        password: &str,
    ) -> HttpResult<ApiResponse<U>> {
        let url = join_url(&self.config.base_url, LOGIN_PATH);
        tracing::debug!(url = %url, "Sending login request");

        let mut authorization = HeaderValue::from_str(&basic_auth_header(email, password))
            .map_err(|e| HttpError::InvalidRequest {
                message: format!("Invalid credentials header: {}", e),
            })?;
        authorization.set_sensitive(true);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, authorization)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(HttpError::from_request_error);

        let result = match response {
            Ok(response) => RawResponse::read(response)
                .await
                .and_then(RawResponse::error_for_status)
                .and_then(RawResponse::decode),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            tracing::debug!(error = %e, "Login failed");
        }
        result
    }

    /// Build a transport carrying the token stored right now.
    ///
    /// Call this once per request; a transport kept around keeps its token
    /// even after the store changes.
    pub fn build_authenticated_transport(&self) -> HttpResult<AuthenticatedTransport> {
        let authorization = match self.store.get_token() {
            Some(token) => {
                let mut value = HeaderValue::from_str(&bearer_auth_header(&token)).map_err(|e| {
                    HttpError::InvalidRequest {
                        message: format!("Stored token is not a valid header value: {}", e),
                    }
                })?;
                value.set_sensitive(true);
                Some(value)
            }
            None => {
                tracing::warn!("No stored token; sending request without Authorization header");
                None
            }
        };

        Ok(AuthenticatedTransport::new(
            self.http.clone(),
            self.config.base_url.clone(),
            authorization,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn provider<S: CredentialStore>(store: S) -> CredentialProvider<S> {
        CredentialProvider::new(ClientConfig::new("https://api.example.com/"), store).unwrap()
    }

    #[test]
    fn test_basic_auth_header() {
        assert_eq!(basic_auth_header("a@b.com", "pw"), "Basic YUBiLmNvbTpwdw==");
        assert_eq!(
            basic_auth_header("a@b.com", "pw"),
            format!("Basic {}", STANDARD.encode("a@b.com:pw"))
        );
    }

    #[test]
    fn test_bearer_header() {
        assert_eq!(bearer_auth_header("abc"), "Bearer abc");
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get_token(), None);

        store.set_token("first");
        assert_eq!(store.get_token().as_deref(), Some("first"));

        store.clear();
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        let store = FileCredentialStore::new(&path);

        assert_eq!(store.get_token(), None);

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "  file-token  ").unwrap();
        assert_eq!(store.get_token().as_deref(), Some("file-token"));

        std::fs::write(&path, "").unwrap();
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn test_unreadable_token_file_is_credential_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists at the path but cannot be read as a file
        let store = FileCredentialStore::new(dir.path());

        let err = store.read_token().unwrap_err();
        assert!(matches!(err, crate::Error::Credential { .. }));
        assert!(err.to_string().contains("Cannot read token file"));

        assert_eq!(store.get_token(), None);

        let missing = FileCredentialStore::new(dir.path().join("absent"));
        assert_eq!(missing.read_token().unwrap(), None);
    }

    #[test]
    fn test_env_store() {
        let var = "RESTWIRE_TEST_TOKEN_ENV_STORE";
        let store = EnvCredentialStore::new(var);

        std::env::remove_var(var);
        assert_eq!(store.get_token(), None);

        std::env::set_var(var, "env-token");
        assert_eq!(store.get_token().as_deref(), Some("env-token"));

        std::env::remove_var(var);
    }

    #[test]
    fn test_transport_reads_token_per_call() {
        let store = Arc::new(MemoryCredentialStore::with_token("old"));
        let provider = provider(store.clone());

        let first = provider.build_authenticated_transport().unwrap();
        store.set_token("new");
        let second = provider.build_authenticated_transport().unwrap();

        assert_eq!(first.authorization().unwrap(), "Bearer old");
        assert_eq!(second.authorization().unwrap(), "Bearer new");
        assert_eq!(second.base_url(), "https://api.example.com/");
    }

    #[test]
    fn test_transport_without_token() {
        let provider = provider(MemoryCredentialStore::new());
        let transport = provider.build_authenticated_transport().unwrap();
        assert!(transport.authorization().is_none());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let provider = provider(MemoryCredentialStore::with_token("bad\ntoken"));
        let err = provider.build_authenticated_transport().unwrap_err();
        assert!(matches!(err, HttpError::InvalidRequest { .. }));
    }

    #[test]
    fn test_user_accepts_token_aliases() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1,
            "email": "a@b.com",
            "accessToken": "tok",
            "role": "admin"
        }))
        .unwrap();

        assert_eq!(user.token.as_deref(), Some("tok"));
        assert_eq!(user.extra.get("role"), Some(&Value::from("admin")));
    }
}
