// ABOUTME: OAuth 1.0a credential types: consumer pair, request token, access token, verifier
// ABOUTME: Secrets are redacted from Debug output and never serialized

use std::fmt;

const REDACTED: &str = "[REDACTED]";

/// Token/secret pair usable for signing a request
pub trait TokenCredentials {
    /// Public token value, sent as `oauth_token`
    fn token(&self) -> &str;
    /// Secret half, used only in the signing key
    fn secret(&self) -> &str;
}

/// Application key and secret registered with the provider
#[derive(Clone, PartialEq, Eq)]
pub struct ConsumerCredentials {
    key: String,
    secret: String,
}

impl ConsumerCredentials {
    /// Create consumer credentials
    #[must_use]
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Consumer key, sent as `oauth_consumer_key`
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Consumer secret, first half of the signing key
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for ConsumerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerCredentials")
            .field("key", &self.key)
            .field("secret", &REDACTED)
            .finish()
    }
}

/// Temporary credentials issued before the user authorizes the application
///
/// Consumed once to build the authorization URL and once more when it is
/// exchanged, together with the verifier, for an [`AccessToken`].
#[derive(Clone, PartialEq, Eq)]
pub struct RequestToken {
    token: String,
    secret: String,
}

impl RequestToken {
    /// Create a request token
    #[must_use]
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

impl TokenCredentials for RequestToken {
    fn token(&self) -> &str {
        &self.token
    }

    fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestToken")
            .field("token", &self.token)
            .field("secret", &REDACTED)
            .finish()
    }
}

/// Credentials signing every data request for the rest of the run
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    secret: String,
}

impl AccessToken {
    /// Create an access token
    #[must_use]
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

impl TokenCredentials for AccessToken {
    fn token(&self) -> &str {
        &self.token
    }

    fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &self.token)
            .field("secret", &REDACTED)
            .finish()
    }
}

/// One-time code proving the user completed authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verifier(String);

impl Verifier {
    /// Wrap a verifier value
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Verifier value, sent as `oauth_verifier`
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let access = AccessToken::new("tok", "very-secret");
        let rendered = format!("{access:?}");
        assert!(rendered.contains("tok"));
        assert!(!rendered.contains("very-secret"));

        let consumer = ConsumerCredentials::new("key", "consumer-secret");
        assert!(!format!("{consumer:?}").contains("consumer-secret"));
    }
}
