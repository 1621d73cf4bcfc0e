// ABOUTME: Three-legged OAuth 1.0a authorization orchestrator around the callback listener
// ABOUTME: Request token, user prompt, callback wait (probe or direct), verifier exchange
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

//! # Authorization Flow
//!
//! 1. bind the callback listener (port `0` by default)
//! 2. request a token with the resolved callback URL
//! 3. hand the authorization URL to the user
//! 4. wait for the redirect, by probing the listener or awaiting its store
//! 5. exchange the verifier for an access token
//!
//! The listener is stopped once the flow ends, whether it succeeded or not.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, instrument};

use super::poller::CallbackPoller;
use crate::callback::{callback_url_for, probe_url_for, CallbackListener, CaptureStore};
use crate::constants::callback::{DEFAULT_CALLBACK_PORT, DEFAULT_POLL_INTERVAL};
use crate::constants::oauth::params;
use crate::errors::{ExportResult, OAuthError};
use crate::models::{AccessToken, CallbackParameters};
use crate::oauth1::{OAuth1Api, OAuth1Service};

/// How the orchestrator learns that the redirect arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackWait {
    /// `GET /callback?print=true` on the listener every `interval`
    Probe {
        /// Delay between probes
        interval: Duration,
    },
    /// Await the capture store in-process
    Direct,
}

impl Default for CallbackWait {
    fn default() -> Self {
        Self::Probe {
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Tunables of the authorization flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSettings {
    /// Local listener port, `0` for an ephemeral one
    pub callback_port: u16,
    /// Wait strategy
    pub wait: CallbackWait,
    /// Upper bound on the wait; `None` waits until interrupted
    pub callback_timeout: Option<Duration>,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            callback_port: DEFAULT_CALLBACK_PORT,
            wait: CallbackWait::default(),
            callback_timeout: None,
        }
    }
}

/// Outcome of a completed authorization
#[derive(Debug, Clone)]
pub struct Authorization {
    /// Token signing every data query of the run
    pub access_token: AccessToken,
    /// Parameters of the provider redirect
    pub callback: CallbackParameters,
}

impl Authorization {
    /// Provider user id from the redirect
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.callback.user_id()
    }
}

/// Orchestrates the browser handshake for one run
pub struct AuthorizationFlow<A> {
    service: OAuth1Service<A>,
    settings: FlowSettings,
}

impl<A: OAuth1Api> AuthorizationFlow<A> {
    /// Create a flow over an OAuth service
    #[must_use]
    pub const fn new(service: OAuth1Service<A>, settings: FlowSettings) -> Self {
        Self { service, settings }
    }

    /// Underlying OAuth service
    #[must_use]
    pub const fn service(&self) -> &OAuth1Service<A> {
        &self.service
    }

    /// Run the handshake; `present` receives the URL the user must open
    ///
    /// # Errors
    ///
    /// - listener bind failure
    /// - request token failure (auth setup)
    /// - callback timeout, when configured
    /// - missing verifier in the redirect
    /// - access token exchange failure
    #[instrument(skip_all, fields(callback.port = self.settings.callback_port))]
    pub async fn authorize<F>(&self, present: F) -> ExportResult<Authorization>
    where
        F: FnOnce(&str) + Send,
    {
        let mut listener = CallbackListener::new();
        let addr = listener.start(self.settings.callback_port).await?;

        let result = self.handshake(&listener, addr, present).await;

        listener.stop().await;
        result
    }

    async fn handshake<F>(
        &self,
        listener: &CallbackListener,
        addr: SocketAddr,
        present: F,
    ) -> ExportResult<Authorization>
    where
        F: FnOnce(&str) + Send,
    {
        let callback_url = callback_url_for(addr);

        info!(oauth.step = "request_token", callback_url = %callback_url, "Requesting temporary credentials");
        let request_token = self.service.request_token(&callback_url).await?;

        present(&self.service.authorization_url(&request_token));

        info!(oauth.step = "callback", wait = ?self.settings.wait, "Waiting for the authorization callback");
        let callback = self.wait_for_callback(listener.store(), addr).await?;

        let verifier = callback.verifier().ok_or(OAuthError::MissingVerifier {
            parameter: params::VERIFIER,
        })?;

        info!(oauth.step = "access_token", "Exchanging verifier for an access token");
        let access_token = self.service.access_token(&request_token, &verifier).await?;

        Ok(Authorization {
            access_token,
            callback,
        })
    }

    async fn wait_for_callback(
        &self,
        store: &CaptureStore,
        addr: SocketAddr,
    ) -> Result<CallbackParameters, OAuthError> {
        let wait = async {
            match self.settings.wait {
                CallbackWait::Probe { interval } => {
                    CallbackPoller::new(probe_url_for(addr), interval).poll().await
                }
                CallbackWait::Direct => store.wait().await,
            }
        };

        match self.settings.callback_timeout {
            None => Ok(wait.await),
            Some(limit) => timeout(limit, wait)
                .await
                .map_err(|_| OAuthError::CallbackTimeout {
                    seconds: limit.as_secs(),
                }),
        }
    }
}
