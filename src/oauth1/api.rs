// ABOUTME: Provider descriptor trait for OAuth 1.0a three-legged authorization
// ABOUTME: Supplies token endpoints, the authorization URL and the HTTP verbs per step
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

use reqwest::Method;

use super::signer::percent_encode;
use crate::constants::oauth::params;
use crate::models::{RequestToken, TokenCredentials};

/// Endpoints and verbs of an OAuth 1.0a provider
pub trait OAuth1Api: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Temporary credential endpoint
    fn request_token_endpoint(&self) -> String;

    /// Token exchange endpoint
    fn access_token_endpoint(&self) -> String;

    /// User-facing authorization endpoint, without query
    fn authorize_endpoint(&self) -> String;

    /// URL the user opens to grant access
    fn authorization_url(&self, request_token: &RequestToken) -> String {
        format!(
            "{}?{}={}",
            self.authorize_endpoint(),
            params::TOKEN,
            percent_encode(request_token.token())
        )
    }

    /// Verb of the request token call
    fn request_token_verb(&self) -> Method {
        Method::POST
    }

    /// Verb of the access token call
    fn access_token_verb(&self) -> Method {
        Method::POST
    }
}
