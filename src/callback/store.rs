// ABOUTME: Set-once capture store handing callback parameters from listener to orchestrator
// ABOUTME: First write wins; readers never observe a partial capture and may await it directly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

//! # Callback Capture Store
//!
//! A single-slot, single-assignment cell. The real-redirect handler writes it
//! at most once; probe handlers and the orchestrator read it any number of
//! times. Waiters parked in [`CaptureStore::wait`] are woken by the write.

use std::sync::OnceLock;

use tokio::sync::Notify;

use crate::models::CallbackParameters;

/// Result of offering parameters to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The parameters were stored
    Captured,
    /// An earlier capture exists; the offered parameters were dropped
    AlreadyCaptured,
}

/// Set-once holder for the captured redirect parameters
#[derive(Debug, Default)]
pub struct CaptureStore {
    slot: OnceLock<CallbackParameters>,
    captured: Notify,
}

impl CaptureStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the parameters unless a capture already happened
    pub fn capture(&self, params: CallbackParameters) -> CaptureOutcome {
        if self.slot.set(params).is_ok() {
            self.captured.notify_waiters();
            CaptureOutcome::Captured
        } else {
            CaptureOutcome::AlreadyCaptured
        }
    }

    /// Captured parameters, if any
    #[must_use]
    pub fn get(&self) -> Option<&CallbackParameters> {
        self.slot.get()
    }

    /// Whether a capture happened
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Wait until parameters are captured and return a copy
    ///
    /// Returns immediately when the capture already happened.
    pub async fn wait(&self) -> CallbackParameters {
        loop {
            // Register before checking so a capture in between is not missed
            let notified = self.captured.notified();
            if let Some(params) = self.slot.get() {
                return params.clone();
            }
            notified.await;
        }
    }
}
