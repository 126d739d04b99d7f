//! Shared test support utilities for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use restwire_core::http::{ClientConfig, MemoryCredentialStore, ResourceClient};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token-123";

/// Base URL of a mock server, with the trailing slash the client expects
pub fn base_url(server: &MockServer) -> String {
    format!("{}/", server.uri())
}

/// Client pointed at `server` holding [`TOKEN`]
pub fn client_for(server: &MockServer) -> ResourceClient<Arc<MemoryCredentialStore>> {
    client_with_store(server, Arc::new(MemoryCredentialStore::with_token(TOKEN)))
}

/// Client pointed at `server` reading tokens from `store`
pub fn client_with_store(
    server: &MockServer,
    store: Arc<MemoryCredentialStore>,
) -> ResourceClient<Arc<MemoryCredentialStore>> {
    ResourceClient::new(ClientConfig::new(base_url(server)), store).expect("valid test config")
}

/// Base URL on a local port nothing is listening on
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}
