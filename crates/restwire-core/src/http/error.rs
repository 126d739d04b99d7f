//! HTTP error classification
//!
//! Every request either produces a response or it does not. The split is
//! kept visible to callers: [`HttpError::response`] is `None` exactly when
//! the server was never heard from.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::http::response::RawResponse;

/// Why a request produced no response at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkErrorKind {
    /// The transport gave up waiting
    Timeout,
    /// DNS failure, refused or reset connection, TLS handshake failure
    Connect,
    /// The connection broke mid-exchange or the body could not be read
    Other,
}

impl std::fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkErrorKind::Timeout => write!(f, "timeout"),
            NetworkErrorKind::Connect => write!(f, "connect"),
            NetworkErrorKind::Other => write!(f, "other"),
        }
    }
}

/// Failure of a single request
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// No response was received
    #[error("Network error ({kind}): {message}")]
    Network {
        kind: NetworkErrorKind,
        message: String,
    },

    /// The server answered with a non-2xx status
    #[error("HTTP error [{}]", .0.status)]
    Status(RawResponse),

    /// The server answered 2xx but the body did not match the requested type
    #[error("Failed to decode response body [{}]: {message}", response.status)]
    Decode {
        response: RawResponse,
        message: String,
    },

    /// The request could not be built (unparseable URL, invalid header value)
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

impl HttpError {
    /// Create from a reqwest error raised while sending or reading
    pub fn from_request_error(error: reqwest::Error) -> Self {
        if error.is_builder() {
            return HttpError::InvalidRequest {
                message: error.to_string(),
            };
        }

        let kind = if error.is_timeout() {
            NetworkErrorKind::Timeout
        } else if error.is_connect() {
            NetworkErrorKind::Connect
        } else {
            NetworkErrorKind::Other
        };

        HttpError::Network {
            kind,
            message: error.to_string(),
        }
    }

    /// The server response, if one was received
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            HttpError::Status(response) => Some(response),
            HttpError::Decode { response, .. } => Some(response),
            HttpError::Network { .. } | HttpError::InvalidRequest { .. } => None,
        }
    }

    /// Consume the error, yielding the server response if one was received
    pub fn into_response(self) -> Option<RawResponse> {
        match self {
            HttpError::Status(response) => Some(response),
            HttpError::Decode { response, .. } => Some(response),
            HttpError::Network { .. } | HttpError::InvalidRequest { .. } => None,
        }
    }

    /// Status code of the server response, if one was received
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }

    /// Kind of network failure, if no response was received
    pub fn network_kind(&self) -> Option<NetworkErrorKind> {
        match self {
            HttpError::Network { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// True when the server rejected the request with 409 Conflict
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }
}
