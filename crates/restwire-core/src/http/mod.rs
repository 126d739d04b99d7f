//! HTTP layer for authenticated resource access
//!
//! This module provides:
//! - Credential stores and the login/bearer credential provider
//! - Resource path construction
//! - A per-request authenticated transport
//! - The resource client with one method per operation
//! - Error classification separating "no response" from "error response"

pub mod auth;
pub mod client;
pub mod error;
pub mod path;
pub mod response;
pub mod transport;

pub use auth::{
    basic_auth_header, bearer_auth_header, CredentialProvider, CredentialStore,
    EnvCredentialStore, FileCredentialStore, MemoryCredentialStore, User,
};
pub use client::{ClientConfig, ResourceClient};
pub use error::{HttpError, NetworkErrorKind};
pub use path::{Identifier, ResourcePath};
pub use response::{ApiResponse, BinaryResponse, RawResponse};
pub use transport::AuthenticatedTransport;

// Re-export commonly used types
pub use reqwest::{Method, StatusCode};

/// Result of a single request
pub type HttpResult<T> = std::result::Result<T, HttpError>;
