// ABOUTME: Unified error handling with exit-code mapping for the exporter
// ABOUTME: Wraps per-stage errors (listener, OAuth, query, output, config) in ExportError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

//! # Unified Error Handling
//!
//! Every fatal condition of a run maps to one [`ErrorCode`], which in turn
//! fixes the process exit status and a human description. Stage-specific
//! enums keep structured context; [`ExportError`] is what crosses module
//! boundaries.

use serde::{Deserialize, Serialize};

/// Configuration errors
pub mod config;
/// Callback listener errors
pub mod listener;
/// OAuth handshake errors
pub mod oauth;
/// CSV destination errors
pub mod output;
/// Signed data query errors
pub mod query;

pub use config::ConfigError;
pub use listener::ListenerError;
pub use oauth::{OAuthError, OAuthStage};
pub use output::OutputError;
pub use query::QueryError;

/// Standard error codes, one per fatal failure kind
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Missing credentials or invalid option values
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,
    /// Local callback port unavailable
    #[serde(rename = "CALLBACK_BIND_FAILED")]
    CallbackBindFailed,
    /// Request token could not be obtained
    #[serde(rename = "AUTH_SETUP_FAILED")]
    AuthSetupFailed,
    /// Configured wait for the browser redirect elapsed
    #[serde(rename = "CALLBACK_TIMEOUT")]
    CallbackTimeout,
    /// Redirect carried no verifier
    #[serde(rename = "MISSING_VERIFIER")]
    MissingVerifier,
    /// Verifier could not be exchanged for an access token
    #[serde(rename = "TOKEN_EXCHANGE_FAILED")]
    TokenExchangeFailed,
    /// Data query failed
    #[serde(rename = "QUERY_FAILED")]
    QueryFailed,
    /// CSV output could not be written
    #[serde(rename = "OUTPUT_FAILED")]
    OutputFailed,
}

impl ErrorCode {
    /// Process exit status for this error
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::ConfigInvalid => 2,
            Self::CallbackBindFailed => 3,
            Self::AuthSetupFailed => 4,
            Self::CallbackTimeout => 5,
            Self::MissingVerifier => 6,
            Self::TokenExchangeFailed => 7,
            Self::QueryFailed => 8,
            Self::OutputFailed => 9,
        }
    }

    /// User-facing description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ConfigInvalid => "The exporter configuration is invalid",
            Self::CallbackBindFailed => "The local callback listener could not be started",
            Self::AuthSetupFailed => {
                "Can not authorize with Withings. Please make sure everything is set up correctly"
            }
            Self::CallbackTimeout => "The browser authorization was not completed in time",
            Self::MissingVerifier => "The authorization callback did not contain a verifier",
            Self::TokenExchangeFailed => "Withings refused to issue an access token",
            Self::QueryFailed => "Querying activities from Withings failed",
            Self::OutputFailed => "Writing the CSV output failed",
        }
    }
}

/// Top-level error of an export run
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Callback listener failure
    #[error(transparent)]
    Listener(#[from] ListenerError),

    /// OAuth handshake failure
    #[error(transparent)]
    OAuth(#[from] OAuthError),

    /// Data query failure
    #[error(transparent)]
    Query(#[from] QueryError),

    /// CSV output failure
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl ExportError {
    /// Error code classifying this failure
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::Listener(_) => ErrorCode::CallbackBindFailed,
            Self::OAuth(e) => e.code(),
            Self::Query(_) => ErrorCode::QueryFailed,
            Self::Output(_) => ErrorCode::OutputFailed,
        }
    }

    /// Process exit status for this failure
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.code().exit_code()
    }
}

/// Result alias used across the exporter
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn exit_codes_are_distinct_and_non_zero() {
        let codes = [
            ErrorCode::ConfigInvalid,
            ErrorCode::CallbackBindFailed,
            ErrorCode::AuthSetupFailed,
            ErrorCode::CallbackTimeout,
            ErrorCode::MissingVerifier,
            ErrorCode::TokenExchangeFailed,
            ErrorCode::QueryFailed,
            ErrorCode::OutputFailed,
        ];
        let mut seen = HashSet::new();
        for code in codes {
            assert_ne!(code.exit_code(), 0);
            assert!(seen.insert(code.exit_code()), "{code:?} reuses an exit code");
        }
    }

    #[test]
    fn oauth_stage_selects_error_code() {
        let setup = ExportError::from(OAuthError::MalformedToken {
            stage: OAuthStage::RequestToken,
            reason: "missing oauth_token",
        });
        let exchange = ExportError::from(OAuthError::MalformedToken {
            stage: OAuthStage::AccessToken,
            reason: "missing oauth_token",
        });
        assert_eq!(setup.code(), ErrorCode::AuthSetupFailed);
        assert_eq!(exchange.code(), ErrorCode::TokenExchangeFailed);
    }
}
