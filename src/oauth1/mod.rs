// ABOUTME: OAuth 1.0a consumer implementation: request signing, provider descriptor, token service
// ABOUTME: HMAC-SHA1 signatures carried in the query string, as the data provider expects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

//! # OAuth 1.0a Client Module
//!
//! The exporter acts as an OAuth 1.0a consumer:
//! - obtains temporary credentials (request token)
//! - sends the user to the provider's authorization page
//! - exchanges the verifier for an access token
//! - signs every data request with the access token

/// Provider descriptor trait
pub mod api;
/// Token endpoint calls
pub mod service;
/// HMAC-SHA1 request signing
pub mod signer;

pub use api::OAuth1Api;
pub use service::OAuth1Service;
pub use signer::{Freshness, OAuthRequest, SignedRequest};
