// ABOUTME: OAuth 1.0a HMAC-SHA1 request signing with query-string parameter transport
// ABOUTME: Builds the signature base string, signing key and the final signed URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

//! # OAuth 1.0a Signer
//!
//! Signatures follow RFC 5849 section 3.4 with `HMAC-SHA1`:
//!
//! ```text
//! base   = METHOD "&" enc(base-url) "&" enc(sorted "k=v" pairs joined by "&")
//! key    = enc(consumer_secret) "&" enc(token_secret)
//! sig    = base64(hmac_sha1(key, base))
//! ```
//!
//! All protocol parameters, including `oauth_signature`, travel in the query
//! string of the request URL.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use reqwest::Method;
use ring::hmac;
use url::Url;

use crate::constants::oauth::{params, OAUTH_VERSION, SIGNATURE_METHOD};
use crate::models::{ConsumerCredentials, TokenCredentials};

const NONCE_LENGTH: usize = 32;

/// Percent-encode per RFC 3986, leaving only `A-Z a-z 0-9 - . _ ~` as is
#[must_use]
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Per-request freshness values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Freshness {
    /// Random `oauth_nonce`
    pub nonce: String,
    /// `oauth_timestamp`, seconds since the epoch
    pub timestamp: i64,
}

impl Freshness {
    /// Random nonce and the current time
    #[must_use]
    pub fn generate() -> Self {
        let nonce = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LENGTH)
            .map(char::from)
            .collect();
        Self {
            nonce,
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Fixed values, for reproducible signatures
    #[must_use]
    pub fn fixed(nonce: impl Into<String>, timestamp: i64) -> Self {
        Self {
            nonce: nonce.into(),
            timestamp,
        }
    }
}

/// A request whose URL now carries every OAuth parameter and the signature
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// HTTP verb the signature was computed for
    pub method: Method,
    /// Final URL to send
    pub url: Url,
    /// Base64 `oauth_signature` value
    pub signature: String,
}

/// Request being prepared for signing
#[derive(Debug, Clone)]
pub struct OAuthRequest {
    method: Method,
    url: Url,
    extra_protocol_params: Vec<(String, String)>,
}

impl OAuthRequest {
    /// Start a request; query parameters already on `url` are signed too
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            extra_protocol_params: Vec::new(),
        }
    }

    /// Append a query parameter
    #[must_use]
    pub fn query_param(mut self, key: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(key, value);
        self
    }

    /// Add a step-specific protocol parameter such as `oauth_callback`
    #[must_use]
    pub fn protocol_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.extra_protocol_params.push((key.to_owned(), value.into()));
        self
    }

    /// Sign with a fresh nonce and timestamp
    #[must_use]
    pub fn sign(
        self,
        consumer: &ConsumerCredentials,
        token: Option<&dyn TokenCredentials>,
    ) -> SignedRequest {
        self.sign_with(consumer, token, &Freshness::generate())
    }

    /// Sign with the given nonce and timestamp
    #[must_use]
    pub fn sign_with(
        self,
        consumer: &ConsumerCredentials,
        token: Option<&dyn TokenCredentials>,
        freshness: &Freshness,
    ) -> SignedRequest {
        let mut protocol_params: Vec<(String, String)> = vec![
            (params::CONSUMER_KEY.to_owned(), consumer.key().to_owned()),
            (params::NONCE.to_owned(), freshness.nonce.clone()),
            (params::SIGNATURE_METHOD.to_owned(), SIGNATURE_METHOD.to_owned()),
            (params::TIMESTAMP.to_owned(), freshness.timestamp.to_string()),
            (params::VERSION.to_owned(), OAUTH_VERSION.to_owned()),
        ];
        if let Some(token) = token {
            protocol_params.push((params::TOKEN.to_owned(), token.token().to_owned()));
        }
        protocol_params.extend(self.extra_protocol_params);

        let mut all_params: Vec<(String, String)> = self.url.query_pairs().into_owned().collect();
        all_params.extend(protocol_params.iter().cloned());

        let base = signature_base_string(&self.method, &self.url, &all_params);
        let key = signing_key(consumer.secret(), token.map(|token| token.secret()));
        let signature = hmac_sha1_base64(&key, &base);

        let mut url = self.url;
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in &protocol_params {
                query.append_pair(name, value);
            }
            query.append_pair(params::SIGNATURE, &signature);
        }

        SignedRequest {
            method: self.method,
            url,
            signature,
        }
    }
}

/// Scheme, authority and path; default ports and the query are dropped
fn base_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    url.port().map_or_else(
        || format!("{}://{host}{}", url.scheme(), url.path()),
        |port| format!("{}://{host}:{port}{}", url.scheme(), url.path()),
    )
}

/// Normalized signature base string for a request
#[must_use]
pub fn signature_base_string(method: &Method, url: &Url, request_params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = request_params
        .iter()
        .map(|(key, value)| (percent_encode(key), percent_encode(value)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.as_str().to_ascii_uppercase(),
        percent_encode(&base_url(url)),
        percent_encode(&normalized)
    )
}

/// `enc(consumer_secret)&enc(token_secret)`; the token half is empty before a token exists
#[must_use]
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret.unwrap_or_default())
    )
}

/// Base64 of `HMAC-SHA1(key, data)`
#[must_use]
pub fn hmac_sha1_base64(key: &str, data: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key.as_bytes());
    STANDARD.encode(hmac::sign(&key, data.as_bytes()).as_ref())
}
