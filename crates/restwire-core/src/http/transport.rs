//! Transport bound to a base URL and an Authorization header

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client as ReqwestClient, Method};
use serde::Serialize;

use crate::http::error::HttpError;
use crate::http::path::{join_url, ResourcePath};
use crate::http::response::RawResponse;
use crate::http::HttpResult;

/// A configured transport for issuing requests under one credential.
///
/// Built by [`CredentialProvider::build_authenticated_transport`](crate::http::CredentialProvider::build_authenticated_transport).
/// The connection pool is shared with every other transport from the same
/// provider; the header and base URL are fixed at construction.
#[derive(Debug, Clone)]
pub struct AuthenticatedTransport {
    http: ReqwestClient,
    base_url: String,
    authorization: Option<HeaderValue>,
}

impl AuthenticatedTransport {
    pub(crate) fn new(
        http: ReqwestClient,
        base_url: String,
        authorization: Option<HeaderValue>,
    ) -> Self {
        Self {
            http,
            base_url,
            authorization,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The `Authorization` header this transport sends, if any
    pub fn authorization(&self) -> Option<&HeaderValue> {
        self.authorization.as_ref()
    }

    /// Absolute URL of a resource path
    pub fn url_for(&self, path: &ResourcePath) -> String {
        join_url(&self.base_url, &path.as_string())
    }

    /// Start a request with the Authorization header already attached
    pub fn request(&self, method: Method, path: &ResourcePath) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, self.url_for(path));
        match &self.authorization {
            Some(value) => builder.header(AUTHORIZATION, value.clone()),
            None => builder,
        }
    }

    /// Issue one request and collect the full response.
    ///
    /// The body, when given, is serialized as JSON unmodified. Non-2xx
    /// responses come back as [`HttpError::Status`].
    pub async fn send<B>(&self, method: Method, path: &ResourcePath, body: Option<&B>) -> HttpResult<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method.clone(), path);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %method, path = %path, "Sending request");

        let result = match builder.send().await {
            Ok(response) => RawResponse::read(response)
                .await
                .and_then(RawResponse::error_for_status),
            Err(e) => Err(HttpError::from_request_error(e)),
        };

        match &result {
            Ok(response) => {
                tracing::debug!(method = %method, path = %path, status = %response.status, "Request completed");
            }
            Err(e) => {
                tracing::debug!(method = %method, path = %path, error = %e, "Request failed");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(authorization: Option<&'static str>) -> AuthenticatedTransport {
        AuthenticatedTransport::new(
            ReqwestClient::new(),
            "https://api.example.com/".to_string(),
            authorization.map(HeaderValue::from_static),
        )
    }

    #[test]
    fn test_url_for() {
        let transport = transport(None);
        assert_eq!(
            transport.url_for(&ResourcePath::item("invoices", 42)),
            "https://api.example.com/invoices/42"
        );
    }

    #[test]
    fn test_request_carries_authorization() {
        let transport = transport(Some("Bearer tok"));
        let request = transport
            .request(Method::GET, &ResourcePath::collection("invoices"))
            .build()
            .unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url().as_str(), "https://api.example.com/invoices");
        assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer tok");
    }

    #[test]
    fn test_request_without_authorization() {
        let transport = transport(None);
        let request = transport
            .request(Method::DELETE, &ResourcePath::item("invoices", 1))
            .build()
            .unwrap();

        assert!(request.headers().get(AUTHORIZATION).is_none());
    }
}
