//! Restwire Core - authenticated REST resource client
//!
//! This crate maps uniform resource operations (read one, read collection,
//! create, replace, delete, search, fetch binary) onto paths under a single
//! base URL, attaching the bearer token currently held by a credential store.
//!
//! # Main Components
//!
//! - **Credential Provider**: HTTP Basic login and per-request bearer transports
//! - **Resource Client**: one request per call, responses passed through as received
//! - **Error Handling**: `thiserror` types separating network failures from error responses
//!
//! # Example
//!
//! ```no_run
//! use restwire_core::http::{ClientConfig, MemoryCredentialStore, ResourceClient};
//! use serde_json::Value;
//!
//! async fn example() -> restwire_core::Result<()> {
//!     let client = ResourceClient::new(
//!         ClientConfig::new("https://api.example.com/"),
//!         MemoryCredentialStore::with_token("secret"),
//!     )?;
//!
//!     let invoice = client.get_one::<Value>("invoices", 42).await?;
//!     println!("{}", invoice.data);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use http::{
    ApiResponse, AuthenticatedTransport, BinaryResponse, ClientConfig, CredentialProvider,
    CredentialStore, EnvCredentialStore, FileCredentialStore, HttpError, HttpResult, Identifier,
    MemoryCredentialStore, NetworkErrorKind, RawResponse, ResourceClient, ResourcePath, User,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
