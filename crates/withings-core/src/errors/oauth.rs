// ABOUTME: OAuth 1.0a handshake error types with stage context
// ABOUTME: Distinguishes request-token setup, verifier, timeout, and access-token exchange failures

use std::fmt;

use super::ErrorCode;

/// Token endpoint being called when an error happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthStage {
    /// Temporary request token issuance
    RequestToken,
    /// Verifier exchange for the access token
    AccessToken,
}

impl fmt::Display for OAuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestToken => write!(f, "request token"),
            Self::AccessToken => write!(f, "access token"),
        }
    }
}

/// Errors of the three-legged authorization flow
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// The endpoint URL could not be parsed
    #[error("Invalid {stage} endpoint '{url}'")]
    InvalidEndpoint {
        /// Stage using the endpoint
        stage: OAuthStage,
        /// Offending URL
        url: String,
        /// Parse failure
        #[source]
        source: url::ParseError,
    },

    /// The provider could not be reached
    #[cfg(feature = "provider-errors")]
    #[error("{stage} request to {endpoint} failed")]
    Transport {
        /// Stage being executed
        stage: OAuthStage,
        /// Endpoint that was called
        endpoint: String,
        /// Underlying HTTP error
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status
    #[error("{stage} rejected by provider with HTTP {status}: {body}")]
    Rejected {
        /// Stage being executed
        stage: OAuthStage,
        /// HTTP status code
        status: u16,
        /// Response body, for the operator
        body: String,
    },

    /// The token response lacked a token or secret
    #[error("{stage} response is malformed: {reason}")]
    MalformedToken {
        /// Stage being executed
        stage: OAuthStage,
        /// What was missing
        reason: &'static str,
    },

    /// The captured callback carried no verifier
    #[error("Callback parameters do not contain '{parameter}'")]
    MissingVerifier {
        /// Name of the expected parameter
        parameter: &'static str,
    },

    /// The configured wait for the browser redirect elapsed
    #[error("No OAuth callback received within {seconds} seconds")]
    CallbackTimeout {
        /// Configured timeout
        seconds: u64,
    },
}

impl OAuthError {
    /// Error code classifying this failure
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MissingVerifier { .. } => ErrorCode::MissingVerifier,
            Self::CallbackTimeout { .. } => ErrorCode::CallbackTimeout,
            Self::InvalidEndpoint { stage, .. }
            | Self::Rejected { stage, .. }
            | Self::MalformedToken { stage, .. } => stage_code(*stage),
            #[cfg(feature = "provider-errors")]
            Self::Transport { stage, .. } => stage_code(*stage),
        }
    }
}

const fn stage_code(stage: OAuthStage) -> ErrorCode {
    match stage {
        OAuthStage::RequestToken => ErrorCode::AuthSetupFailed,
        OAuthStage::AccessToken => ErrorCode::TokenExchangeFailed,
    }
}
