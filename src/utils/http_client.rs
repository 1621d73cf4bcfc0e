// ABOUTME: HTTP client constructors with per-purpose timeout configuration
// ABOUTME: OAuth token calls, provider data queries, and loopback callback probes

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Create a new HTTP client with custom timeout settings
///
/// # Arguments
/// * `timeout` - Request timeout
/// * `connect_timeout` - Connection timeout
///
/// # Returns
/// A new `reqwest::Client`; falls back to a default client if the builder fails
#[must_use]
pub fn create_client_with_timeout(timeout: Duration, connect_timeout: Duration) -> Client {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Create a new HTTP client optimized for OAuth token endpoints
///
/// Token issuance and exchange are short operations.
#[must_use]
pub fn oauth_client() -> Client {
    create_client_with_timeout(Duration::from_secs(15), Duration::from_secs(5))
}

/// Create a new HTTP client for provider data queries
#[must_use]
pub fn api_client() -> Client {
    create_client_with_timeout(Duration::from_secs(60), Duration::from_secs(10))
}

/// Create a new HTTP client for probing the local callback listener
///
/// The listener is on loopback, so anything slower than a second is treated
/// as "not ready" and retried on the next tick. Proxies are bypassed.
#[must_use]
pub fn probe_client() -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(1))
        .connect_timeout(Duration::from_millis(500))
        .no_proxy()
        .build()
        .unwrap_or_else(|_| Client::new())
}
