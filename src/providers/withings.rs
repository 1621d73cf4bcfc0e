// ABOUTME: Withings provider descriptor: OAuth 1.0a endpoints and data API base URL
// ABOUTME: Defaults to the public Withings hosts, overridable through environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

use std::env;

use crate::constants::env_keys;
use crate::constants::oauth::{
    ACCESS_TOKEN_PATH, AUTHORIZE_PATH, REQUEST_TOKEN_PATH, WITHINGS_API_BASE_URL,
    WITHINGS_OAUTH_BASE_URL,
};
use crate::oauth1::OAuth1Api;

/// Base URLs of the Withings OAuth host and data API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithingsEndpoints {
    /// Host serving request, authorize and access token paths
    pub oauth_base_url: String,
    /// Data API base, method paths are appended to it
    pub api_base_url: String,
}

impl Default for WithingsEndpoints {
    fn default() -> Self {
        Self {
            oauth_base_url: WITHINGS_OAUTH_BASE_URL.to_owned(),
            api_base_url: WITHINGS_API_BASE_URL.to_owned(),
        }
    }
}

impl WithingsEndpoints {
    /// Defaults with `WITHINGS_OAUTH_URL` / `WITHINGS_API_URL` overrides
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            oauth_base_url: env::var(env_keys::OAUTH_URL).unwrap_or(defaults.oauth_base_url),
            api_base_url: env::var(env_keys::API_URL).unwrap_or(defaults.api_base_url),
        }
    }

    /// Point both hosts at one base, as a local fake provider does
    #[must_use]
    pub fn local(base_url: &str) -> Self {
        Self {
            oauth_base_url: base_url.to_owned(),
            api_base_url: base_url.to_owned(),
        }
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}

/// Withings as an OAuth 1.0a provider
#[derive(Debug, Clone, Default)]
pub struct WithingsApi {
    endpoints: WithingsEndpoints,
}

impl WithingsApi {
    /// Descriptor over the given endpoints
    #[must_use]
    pub const fn new(endpoints: WithingsEndpoints) -> Self {
        Self { endpoints }
    }

    /// Configured endpoints
    #[must_use]
    pub const fn endpoints(&self) -> &WithingsEndpoints {
        &self.endpoints
    }
}

impl OAuth1Api for WithingsApi {
    fn name(&self) -> &'static str {
        "withings"
    }

    fn request_token_endpoint(&self) -> String {
        join(&self.endpoints.oauth_base_url, REQUEST_TOKEN_PATH)
    }

    fn access_token_endpoint(&self) -> String {
        join(&self.endpoints.oauth_base_url, ACCESS_TOKEN_PATH)
    }

    fn authorize_endpoint(&self) -> String {
        join(&self.endpoints.oauth_base_url, AUTHORIZE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequestToken;

    #[test]
    fn default_endpoints_point_at_withings() {
        let api = WithingsApi::default();
        assert_eq!(
            api.request_token_endpoint(),
            "https://oauth.withings.com/account/request_token"
        );
        assert_eq!(
            api.access_token_endpoint(),
            "https://oauth.withings.com/account/access_token"
        );
        assert_eq!(
            api.authorization_url(&RequestToken::new("abc", "secret")),
            "https://oauth.withings.com/account/authorize?oauth_token=abc"
        );
    }

    #[test]
    fn local_base_tolerates_trailing_slash() {
        let api = WithingsApi::new(WithingsEndpoints::local("http://127.0.0.1:9000/"));
        assert_eq!(
            api.authorize_endpoint(),
            "http://127.0.0.1:9000/account/authorize"
        );
    }
}
