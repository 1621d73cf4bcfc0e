// ABOUTME: Loopback HTTP poller waiting for the callback listener to report a capture
// ABOUTME: Probe failures and "not ready" answers are retried on a fixed interval
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::models::CallbackParameters;
use crate::utils::http_client::probe_client;

/// Answer to a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The listener holds captured parameters
    Ready(CallbackParameters),
    /// Nothing captured yet, or the listener was not reachable
    NotReady,
}

/// Polls the probe URL until parameters are available
pub struct CallbackPoller {
    client: Client,
    probe_url: String,
    interval: Duration,
}

impl CallbackPoller {
    /// Poll `probe_url` every `interval`
    #[must_use]
    pub fn new(probe_url: impl Into<String>, interval: Duration) -> Self {
        Self {
            client: probe_client(),
            probe_url: probe_url.into(),
            interval,
        }
    }

    /// Issue one probe
    pub async fn probe_once(&self) -> ProbeOutcome {
        let response = match self.client.get(&self.probe_url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "Callback probe failed, retrying");
                return ProbeOutcome::NotReady;
            }
        };

        if response.status() != StatusCode::OK {
            debug!(status = response.status().as_u16(), "Callback not received yet");
            return ProbeOutcome::NotReady;
        }

        match response.text().await {
            Ok(body) => ProbeOutcome::Ready(CallbackParameters::from_probe_body(&body)),
            Err(e) => {
                debug!(error = %e, "Callback probe body unreadable, retrying");
                ProbeOutcome::NotReady
            }
        }
    }

    /// Probe until the listener reports a capture; never gives up on its own
    pub async fn poll(&self) -> CallbackParameters {
        let mut attempts: u64 = 0;
        loop {
            attempts += 1;
            if let ProbeOutcome::Ready(params) = self.probe_once().await {
                info!(attempts, "Callback received, continuing");
                return params;
            }
            sleep(self.interval).await;
        }
    }
}
