// ABOUTME: OAuth 1.0a client service performing the request-token and access-token calls
// ABOUTME: Signs token requests and parses form-encoded token responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

//! # OAuth 1.0a Service
//!
//! Drives the two server-to-server legs of the three-legged flow. The third
//! leg, the user granting access in a browser, happens between
//! [`OAuth1Service::request_token`] and [`OAuth1Service::access_token`].

use reqwest::Client;
use tracing::{debug, info, warn};
use url::{form_urlencoded, Url};

use super::api::OAuth1Api;
use super::signer::{OAuthRequest, SignedRequest};
use crate::constants::oauth::params;
use crate::errors::{OAuthError, OAuthStage};
use crate::models::{AccessToken, ConsumerCredentials, RequestToken, TokenCredentials, Verifier};
use crate::utils::http_client::oauth_client;

/// Token and secret parsed from a token endpoint response
struct TokenPair {
    token: String,
    secret: String,
}

/// OAuth 1.0a consumer bound to one provider
pub struct OAuth1Service<A> {
    api: A,
    consumer: ConsumerCredentials,
    client: Client,
}

impl<A: OAuth1Api> OAuth1Service<A> {
    /// Create a service with the default OAuth HTTP client
    #[must_use]
    pub fn new(api: A, consumer: ConsumerCredentials) -> Self {
        Self::with_client(api, consumer, oauth_client())
    }

    /// Create a service with a caller-provided HTTP client
    #[must_use]
    pub fn with_client(api: A, consumer: ConsumerCredentials, client: Client) -> Self {
        Self {
            api,
            consumer,
            client,
        }
    }

    /// Provider descriptor
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Application credentials
    #[must_use]
    pub fn consumer(&self) -> &ConsumerCredentials {
        &self.consumer
    }

    /// Obtain temporary credentials, registering `callback_url` for the redirect
    ///
    /// # Errors
    ///
    /// Returns an [`OAuthError`] in the request-token stage if the endpoint is
    /// invalid, unreachable, rejects the call, or answers without token/secret.
    pub async fn request_token(&self, callback_url: &str) -> Result<RequestToken, OAuthError> {
        let stage = OAuthStage::RequestToken;
        let endpoint = self.api.request_token_endpoint();
        let request = OAuthRequest::new(self.api.request_token_verb(), parse_endpoint(stage, &endpoint)?)
            .protocol_param(params::CALLBACK, callback_url);
        let signed = request.sign(&self.consumer, None);

        let pair = self.token_call(stage, &endpoint, signed).await?;
        info!(provider = self.api.name(), "Obtained request token");
        Ok(RequestToken::new(pair.token, pair.secret))
    }

    /// URL the user opens to authorize the request token
    #[must_use]
    pub fn authorization_url(&self, request_token: &RequestToken) -> String {
        self.api.authorization_url(request_token)
    }

    /// Exchange the authorized request token and verifier for an access token
    ///
    /// # Errors
    ///
    /// Returns an [`OAuthError`] in the access-token stage on any failure of
    /// the exchange call.
    pub async fn access_token(
        &self,
        request_token: &RequestToken,
        verifier: &Verifier,
    ) -> Result<AccessToken, OAuthError> {
        let stage = OAuthStage::AccessToken;
        let endpoint = self.api.access_token_endpoint();
        let request = OAuthRequest::new(self.api.access_token_verb(), parse_endpoint(stage, &endpoint)?)
            .protocol_param(params::VERIFIER, verifier.as_str());
        let signed = request.sign(&self.consumer, Some(request_token as &dyn TokenCredentials));

        let pair = self.token_call(stage, &endpoint, signed).await?;
        info!(provider = self.api.name(), "Obtained access token");
        Ok(AccessToken::new(pair.token, pair.secret))
    }

    async fn token_call(
        &self,
        stage: OAuthStage,
        endpoint: &str,
        signed: SignedRequest,
    ) -> Result<TokenPair, OAuthError> {
        debug!(oauth.step = %stage, method = %signed.method, endpoint, "Calling token endpoint");

        let response = self
            .client
            .request(signed.method, signed.url)
            .send()
            .await
            .map_err(|source| OAuthError::Transport {
                stage,
                endpoint: endpoint.to_owned(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| OAuthError::Transport {
            stage,
            endpoint: endpoint.to_owned(),
            source,
        })?;

        if !status.is_success() {
            warn!(oauth.step = %stage, status = status.as_u16(), "Token endpoint rejected the call");
            return Err(OAuthError::Rejected {
                stage,
                status: status.as_u16(),
                body,
            });
        }

        parse_token_response(stage, &body)
    }
}

fn parse_endpoint(stage: OAuthStage, endpoint: &str) -> Result<Url, OAuthError> {
    Url::parse(endpoint).map_err(|source| OAuthError::InvalidEndpoint {
        stage,
        url: endpoint.to_owned(),
        source,
    })
}

/// Parse `oauth_token=...&oauth_token_secret=...`
fn parse_token_response(stage: OAuthStage, body: &str) -> Result<TokenPair, OAuthError> {
    let mut token = None;
    let mut secret = None;
    for (key, value) in form_urlencoded::parse(body.trim().as_bytes()) {
        match key.as_ref() {
            params::TOKEN if token.is_none() => token = Some(value.into_owned()),
            params::TOKEN_SECRET if secret.is_none() => secret = Some(value.into_owned()),
            _ => {}
        }
    }

    let token = token
        .filter(|t| !t.is_empty())
        .ok_or(OAuthError::MalformedToken {
            stage,
            reason: "missing oauth_token",
        })?;
    let secret = secret.ok_or(OAuthError::MalformedToken {
        stage,
        reason: "missing oauth_token_secret",
    })?;

    Ok(TokenPair { token, secret })
}
