//! Response types passed back to callers
//!
//! A response is handed over as received: status, headers and body. The only
//! transformation applied is the typed JSON decode the caller asked for.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::error::HttpError;

/// A server response with a decoded body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers, untouched
    pub headers: HeaderMap,
    /// Response body
    pub data: T,
}

/// A response whose body has not been interpreted
pub type RawResponse = ApiResponse<Bytes>;

/// A response to a binary fetch; the body is never parsed
pub type BinaryResponse = ApiResponse<Bytes>;

impl<T> ApiResponse<T> {
    /// True for 204 No Content
    pub fn is_no_content(&self) -> bool {
        self.status == StatusCode::NO_CONTENT
    }

    /// Consume the response, keeping only the body
    pub fn into_data(self) -> T {
        self.data
    }

    /// Transform the body while keeping status and headers
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            status: self.status,
            headers: self.headers,
            data: f(self.data),
        }
    }
}

impl RawResponse {
    /// Read status, headers and full body from a transport response
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, HttpError> {
        let status = response.status();
        let headers = response.headers().clone();
        let data = response
            .bytes()
            .await
            .map_err(HttpError::from_request_error)?;

        Ok(Self {
            status,
            headers,
            data,
        })
    }

    /// Fail with [`HttpError::Status`] unless the status is 2xx
    pub(crate) fn error_for_status(self) -> Result<Self, HttpError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(HttpError::Status(self))
        }
    }

    /// Decode the body as JSON into `T`.
    ///
    /// An empty body decodes as JSON `null`, so `Value`, `Option<_>` and `()`
    /// accept 204 responses.
    pub fn decode<T: DeserializeOwned>(self) -> Result<ApiResponse<T>, HttpError> {
        let parsed = if self.data.is_empty() {
            serde_json::from_slice::<T>(b"null")
        } else {
            serde_json::from_slice::<T>(&self.data)
        };

        match parsed {
            Ok(data) => Ok(ApiResponse {
                status: self.status,
                headers: self.headers,
                data,
            }),
            Err(e) => Err(HttpError::Decode {
                message: e.to_string(),
                response: self,
            }),
        }
    }

    /// Parse the body as JSON without consuming the response
    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_slice(&self.data).ok()
    }

    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// Declared content type, if any
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Encode the body as a `data:` URL using the declared content type
    pub fn to_data_url(&self) -> String {
        let mime = self.content_type().unwrap_or("application/octet-stream");
        format!("data:{};base64,{}", mime, STANDARD.encode(&self.data))
    }

    /// Look up a per-field message in a server validation error body.
    ///
    /// Expects `{"messages": [{"fieldName": "...", "message": "..."}]}`.
    pub fn field_message(&self, field_code: &str) -> Option<String> {
        let body: Value = self.json()?;
        body.get("messages")?
            .as_array()?
            .iter()
            .find(|entry| entry.get("fieldName").and_then(Value::as_str) == Some(field_code))
            .and_then(|entry| entry.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use serde::Deserialize;

    fn raw(status: StatusCode, body: &'static [u8]) -> RawResponse {
        RawResponse {
            status,
            headers: HeaderMap::new(),
            data: Bytes::from_static(body),
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Invoice {
        id: u64,
        total: u64,
    }

    #[test]
    fn test_decode_typed_body() {
        let response = raw(StatusCode::OK, br#"{"id":42,"total":100}"#)
            .decode::<Invoice>()
            .unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.data, Invoice { id: 42, total: 100 });
    }

    #[test]
    fn test_decode_empty_body_as_null() {
        let response = raw(StatusCode::NO_CONTENT, b"").decode::<Value>().unwrap();
        assert!(response.is_no_content());
        assert_eq!(response.data, Value::Null);

        let response = raw(StatusCode::NO_CONTENT, b"").decode::<Option<Invoice>>().unwrap();
        assert_eq!(response.data, None);
    }

    #[test]
    fn test_decode_mismatch_keeps_response() {
        let err = raw(StatusCode::OK, b"<html>").decode::<Invoice>().unwrap_err();
        match err {
            HttpError::Decode { response, .. } => {
                assert_eq!(response.status, StatusCode::OK);
                assert_eq!(response.text(), "<html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_for_status() {
        assert!(raw(StatusCode::CREATED, b"").error_for_status().is_ok());

        let err = raw(StatusCode::NOT_FOUND, b"").error_for_status().unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_data_url() {
        let mut response = raw(StatusCode::OK, b"\x89PNG");
        assert_eq!(response.to_data_url(), "data:application/octet-stream;base64,iVBORw==");

        response
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("image/png"));
        assert_eq!(response.to_data_url(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_field_message() {
        let response = raw(
            StatusCode::CONFLICT,
            br#"{"messages":[{"fieldName":"email","message":"already taken"},{"fieldName":"phone","message":"invalid"}]}"#,
        );

        assert_eq!(response.field_message("email").as_deref(), Some("already taken"));
        assert_eq!(response.field_message("phone").as_deref(), Some("invalid"));
        assert_eq!(response.field_message("name"), None);
        assert_eq!(raw(StatusCode::CONFLICT, b"not json").field_message("email"), None);
    }

    #[test]
    fn test_map_keeps_status() {
        let response = raw(StatusCode::ACCEPTED, b"abc").map(|b| b.len());
        assert_eq!(response.status, StatusCode::ACCEPTED);
        assert_eq!(response.into_data(), 3);
    }
}
