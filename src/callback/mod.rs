// ABOUTME: OAuth callback capture: set-once store and the ephemeral loopback listener
// ABOUTME: Receives the provider redirect and answers status probes on one path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

//! # Callback Module
//!
//! The provider can only hand the authorization result to an HTTP endpoint,
//! so a short-lived listener on `127.0.0.1` receives the redirect and keeps
//! its query parameters in a [`CaptureStore`].

/// Ephemeral loopback HTTP listener
pub mod listener;
/// Set-once holder for captured redirect parameters
pub mod store;

pub use listener::{
    callback_router, callback_url_for, probe_url_for, CallbackListener, ListenerStatus,
};
pub use store::{CaptureOutcome, CaptureStore};
