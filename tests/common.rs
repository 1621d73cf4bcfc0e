// ABOUTME: Shared test utilities: quiet logging and a fake Withings provider on loopback
// ABOUTME: The fake issues tokens, serves activities, records calls and checks their signatures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `withings_export`

use std::sync::{Arc, Mutex, Once};

use axum::{
    extract::{RawQuery, State},
    http::{Method, StatusCode},
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use url::form_urlencoded;
use withings_export::models::ConsumerCredentials;
use withings_export::oauth1::signer::{hmac_sha1_base64, signature_base_string, signing_key};
use withings_export::providers::WithingsEndpoints;

pub const CONSUMER_KEY: &str = "test-consumer-key";
pub const CONSUMER_SECRET: &str = "test-consumer-secret";
pub const REQUEST_TOKEN: &str = "req-token";
pub const REQUEST_SECRET: &str = "req-secret";
pub const ACCESS_TOKEN: &str = "acc-token";
pub const ACCESS_SECRET: &str = "acc-secret";

pub const REQUEST_TOKEN_PATH: &str = "/account/request_token";
pub const ACCESS_TOKEN_PATH: &str = "/account/access_token";
pub const MEASURE_PATH: &str = "/measure";

pub const ONE_ROW_ENVELOPE: &str = r#"{"status":0,"body":{"activities":[{"date":"2024-01-01","steps":100,"calories":50,"elevation":2}]}}"#;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Loopback server that answers every connection with `200 OK` headers
/// promising more body than it sends, then hangs up
pub async fn truncated_body_server() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    init_test_logging();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0_u8; 4096];
            let _ = socket.read(&mut request).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 512\r\n\r\noauth_token=cut")
                .await;
            let _ = socket.shutdown().await;
        }
    });
    base_url
}

/// Consumer credentials the fake provider accepts
pub fn consumer() -> ConsumerCredentials {
    ConsumerCredentials::new(CONSUMER_KEY, CONSUMER_SECRET)
}

/// HTTP client that never routes loopback traffic through a proxy
pub fn loopback_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Canned answers of the fake provider
#[derive(Debug, Clone)]
pub struct FakeBehavior {
    pub request_token: (u16, String),
    pub access_token: (u16, String),
    pub activities: (u16, String),
}

impl Default for FakeBehavior {
    fn default() -> Self {
        Self {
            request_token: (
                200,
                format!(
                    "oauth_token={REQUEST_TOKEN}&oauth_token_secret={REQUEST_SECRET}&oauth_callback_confirmed=true"
                ),
            ),
            access_token: (
                200,
                format!("oauth_token={ACCESS_TOKEN}&oauth_token_secret={ACCESS_SECRET}"),
            ),
            activities: (200, ONE_ROW_ENVELOPE.to_owned()),
        }
    }
}

/// One request received by the fake provider
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: &'static str,
    pub method: Method,
    pub params: Vec<(String, String)>,
    pub signature_valid: bool,
}

impl RecordedCall {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

struct FakeState {
    base_url: String,
    behavior: FakeBehavior,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeState {
    fn record(
        &self,
        path: &'static str,
        method: Method,
        query: Option<&str>,
        token_secret: Option<&str>,
    ) {
        let params: Vec<(String, String)> = form_urlencoded::parse(query.unwrap_or_default().as_bytes())
            .into_owned()
            .collect();

        let signature = params
            .iter()
            .find(|(k, _)| k == "oauth_signature")
            .map(|(_, v)| v.clone());
        let unsigned: Vec<(String, String)> = params
            .iter()
            .filter(|(k, _)| k != "oauth_signature")
            .cloned()
            .collect();
        let url = url::Url::parse(&format!("{}{path}", self.base_url)).unwrap();
        let base = signature_base_string(&method, &url, &unsigned);
        let expected = hmac_sha1_base64(&signing_key(CONSUMER_SECRET, token_secret), &base);

        self.calls.lock().unwrap().push(RecordedCall {
            path,
            method,
            signature_valid: signature.as_deref() == Some(expected.as_str()),
            params,
        });
    }
}

async fn request_token(
    State(state): State<Arc<FakeState>>,
    method: Method,
    RawQuery(query): RawQuery,
) -> (StatusCode, String) {
    state.record(REQUEST_TOKEN_PATH, method, query.as_deref(), None);
    reply(&state.behavior.request_token)
}

async fn access_token(
    State(state): State<Arc<FakeState>>,
    method: Method,
    RawQuery(query): RawQuery,
) -> (StatusCode, String) {
    state.record(ACCESS_TOKEN_PATH, method, query.as_deref(), Some(REQUEST_SECRET));
    reply(&state.behavior.access_token)
}

async fn measure(
    State(state): State<Arc<FakeState>>,
    method: Method,
    RawQuery(query): RawQuery,
) -> (StatusCode, String) {
    state.record(MEASURE_PATH, method, query.as_deref(), Some(ACCESS_SECRET));
    reply(&state.behavior.activities)
}

fn reply((status, body): &(u16, String)) -> (StatusCode, String) {
    (StatusCode::from_u16(*status).unwrap(), body.clone())
}

/// Fake Withings OAuth host and data API on an ephemeral loopback port
pub struct FakeProvider {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeProvider {
    pub async fn start() -> Self {
        Self::start_with(FakeBehavior::default()).await
    }

    pub async fn start_with(behavior: FakeBehavior) -> Self {
        init_test_logging();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let state = Arc::new(FakeState {
            base_url: base_url.clone(),
            behavior,
            calls: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route(REQUEST_TOKEN_PATH, any(request_token))
            .route(ACCESS_TOKEN_PATH, any(access_token))
            .route(MEASURE_PATH, get(measure))
            .with_state(Arc::clone(&state));

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { base_url, state }
    }

    pub fn endpoints(&self) -> WithingsEndpoints {
        WithingsEndpoints::local(&self.base_url)
    }

    pub fn calls(&self, path: &str) -> Vec<RecordedCall> {
        self.state
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.path == path)
            .cloned()
            .collect()
    }

    /// `oauth_callback` registered by the last request token call
    pub fn registered_callback(&self) -> Option<String> {
        self.calls(REQUEST_TOKEN_PATH)
            .last()
            .and_then(|call| call.param("oauth_callback").map(str::to_owned))
    }

    /// A `present` callback acting like the user's browser: once the
    /// authorization URL is shown, the provider redirects to the registered
    /// callback with `redirect_query`
    pub fn browser(&self, redirect_query: &str) -> impl FnOnce(&str) + Send + 'static {
        let state = Arc::clone(&self.state);
        let redirect_query = redirect_query.to_owned();
        move |authorization_url: &str| {
            assert!(authorization_url.contains(&format!("oauth_token={REQUEST_TOKEN}")));
            let callback = state
                .calls
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|call| call.path == REQUEST_TOKEN_PATH)
                .and_then(|call| call.param("oauth_callback").map(str::to_owned))
                .expect("request token call registered a callback");
            tokio::spawn(async move {
                let _ = loopback_client()
                    .get(format!("{callback}?{redirect_query}"))
                    .send()
                    .await;
            });
        }
    }
}
