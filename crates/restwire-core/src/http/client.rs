//! Resource client
//!
//! Maps resource operations onto paths under the configured base URL. Each
//! call builds a fresh authenticated transport, sends exactly one request and
//! hands back the response or the error as-is. There is no retry layer.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::http::auth::{CredentialProvider, CredentialStore, User};
use crate::http::path::{Identifier, ResourcePath};
use crate::http::response::{ApiResponse, BinaryResponse, RawResponse};
use crate::http::HttpResult;
use crate::{Error, Result};

/// Environment variable read by [`ClientConfig::from_env`]
pub const BASE_URL_ENV_VAR: &str = "RESTWIRE_BASE_URL";

/// Configuration for the resource client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin every request path is joined onto, e.g. `https://api.example.com/`
    pub base_url: String,
    /// Overall request timeout in seconds; `None` keeps the transport default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: None,
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Read the base URL from `RESTWIRE_BASE_URL`, loading `.env` first
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let base_url = std::env::var(BASE_URL_ENV_VAR).map_err(|_| {
            Error::configuration(format!("Environment variable {} not found", BASE_URL_ENV_VAR))
        })?;
        Ok(Self::new(base_url))
    }

    /// Check that the base URL is an absolute URL
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::configuration("Base URL is empty"));
        }

        url::Url::parse(&self.base_url).map_err(|e| Error::Configuration {
            message: format!("Invalid base URL: {}", self.base_url),
            source: Some(e.into()),
        })?;

        if self.timeout_secs == Some(0) {
            return Err(Error::configuration("Timeout cannot be zero"));
        }
        Ok(())
    }
}

/// Client for CRUD, search and binary operations on named resources
#[derive(Debug, Clone)]
pub struct ResourceClient<S> {
    credentials: CredentialProvider<S>,
}

impl<S: CredentialStore> ResourceClient<S> {
    /// Create a client reading tokens from `store`
    pub fn new(config: ClientConfig, store: S) -> Result<Self> {
        Ok(Self::from_provider(CredentialProvider::new(config, store)?))
    }

    pub fn from_provider(credentials: CredentialProvider<S>) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &CredentialProvider<S> {
        &self.credentials
    }

    /// Log in; see [`CredentialProvider::authenticate`]
    pub async fn login(&self, email: &str, password: &str) -> HttpResult<ApiResponse<User>> {
        self.credentials.authenticate(email, password).await
    }

    /// GET `{resource}/{id}`
    pub async fn get_one<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: impl Into<Identifier>,
    ) -> HttpResult<ApiResponse<T>> {
        self.execute(Method::GET, &ResourcePath::item(resource, id), None::<&()>)
            .await?
            .decode()
    }

    /// GET `{resource}`
    pub async fn get_collection<T: DeserializeOwned>(&self, resource: &str) -> HttpResult<ApiResponse<T>> {
        self.execute(Method::GET, &ResourcePath::collection(resource), None::<&()>)
            .await?
            .decode()
    }

    /// DELETE `{resource}/{id}`; the body is returned uninterpreted
    pub async fn delete(&self, resource: &str, id: impl Into<Identifier>) -> HttpResult<RawResponse> {
        self.execute(Method::DELETE, &ResourcePath::item(resource, id), None::<&()>)
            .await
    }

    /// POST `payload` to `{resource}`
    pub async fn create<B, T>(&self, resource: &str, payload: &B) -> HttpResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, &ResourcePath::collection(resource), Some(payload))
            .await?
            .decode()
    }

    /// PUT `payload` to `{resource}/{id}`
    pub async fn replace<B, T>(
        &self,
        resource: &str,
        id: impl Into<Identifier>,
        payload: &B,
    ) -> HttpResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::PUT, &ResourcePath::item(resource, id), Some(payload))
            .await?
            .decode()
    }

    /// POST `query` to `{resource}/search`
    pub async fn search<Q, T>(&self, resource: &str, query: &Q) -> HttpResult<ApiResponse<T>>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, &ResourcePath::search(resource), Some(query))
            .await?
            .decode()
    }

    /// GET `{resource}/{id}/{sub_path}` as opaque bytes
    pub async fn fetch_binary(
        &self,
        resource: &str,
        id: impl Into<Identifier>,
        sub_path: &str,
    ) -> HttpResult<BinaryResponse> {
        self.execute(Method::GET, &ResourcePath::nested(resource, id, sub_path), None::<&()>)
            .await
    }

    /// Issue an arbitrary request under the current credential
    pub async fn execute<B>(&self, method: Method, path: &ResourcePath, body: Option<&B>) -> HttpResult<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        self.credentials
            .build_authenticated_transport()?
            .send(method, path, body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::auth::MemoryCredentialStore;

    #[test]
    fn test_config_validation() {
        assert!(ClientConfig::new("https://api.example.com/").validate().is_ok());
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("not a url").validate().is_err());
        assert!(ClientConfig::new("https://api.example.com/")
            .with_timeout_secs(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"https://api.example.com/"}"#).unwrap();
        assert_eq!(config.base_url, "https://api.example.com/");
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let result = ResourceClient::new(ClientConfig::new("::"), MemoryCredentialStore::new());
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_config_from_env() {
        let original = std::env::var(BASE_URL_ENV_VAR).ok();

        std::env::set_var(BASE_URL_ENV_VAR, "https://env.example.com/");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://env.example.com/");

        match original {
            Some(value) => std::env::set_var(BASE_URL_ENV_VAR, value),
            None => std::env::remove_var(BASE_URL_ENV_VAR),
        }
    }
}
