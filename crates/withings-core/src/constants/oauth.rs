// ABOUTME: OAuth 1.0a protocol parameter names and Withings endpoint constants
// ABOUTME: Centralizes provider URLs and wire names to eliminate hardcoded strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

/// Withings OAuth host serving the three token endpoints
pub const WITHINGS_OAUTH_BASE_URL: &str = "https://oauth.withings.com";

/// Request token endpoint path
pub const REQUEST_TOKEN_PATH: &str = "/account/request_token";

/// User-facing authorization endpoint path
pub const AUTHORIZE_PATH: &str = "/account/authorize";

/// Access token endpoint path
pub const ACCESS_TOKEN_PATH: &str = "/account/access_token";

/// Withings data API base URL
pub const WITHINGS_API_BASE_URL: &str = "http://wbsapi.withings.net/v2";

/// Data API method serving activity summaries
pub const MEASURE_METHOD: &str = "/measure";

/// Action discriminator for daily activity summaries
pub const GET_ACTIVITY_ACTION: &str = "getactivity";

/// Signature method; the only one the provider accepts
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// Protocol version sent with every signed request
pub const OAUTH_VERSION: &str = "1.0";

/// OAuth 1.0a wire parameter names
pub mod params {
    /// Consumer key
    pub const CONSUMER_KEY: &str = "oauth_consumer_key";
    /// Request or access token
    pub const TOKEN: &str = "oauth_token";
    /// Token secret in token endpoint responses
    pub const TOKEN_SECRET: &str = "oauth_token_secret";
    /// Verifier returned through the callback redirect
    pub const VERIFIER: &str = "oauth_verifier";
    /// Callback URL sent with the request token call
    pub const CALLBACK: &str = "oauth_callback";
    /// Per-request nonce
    pub const NONCE: &str = "oauth_nonce";
    /// Per-request unix timestamp
    pub const TIMESTAMP: &str = "oauth_timestamp";
    /// Signature method name
    pub const SIGNATURE_METHOD: &str = "oauth_signature_method";
    /// Protocol version
    pub const VERSION: &str = "oauth_version";
    /// Computed signature
    pub const SIGNATURE: &str = "oauth_signature";
    /// Provider-assigned user identifier in the callback redirect
    pub const USER_ID: &str = "userid";
}

/// Query parameter names of the data API
pub mod query {
    /// Action discriminator
    pub const ACTION: &str = "action";
    /// User identifier
    pub const USER_ID: &str = "userid";
    /// Inclusive start date, `yyyy-mm-dd`
    pub const START_DATE: &str = "startdateymd";
    /// Inclusive end date, `yyyy-mm-dd`
    pub const END_DATE: &str = "enddateymd";
}
