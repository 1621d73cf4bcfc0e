// ABOUTME: Authorization flow orchestration for the OAuth 1.0a browser handshake
// ABOUTME: Flow settings, callback wait strategies and the loopback probe poller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

/// Orchestrator
pub mod flow;
/// Probe-based callback wait
pub mod poller;

pub use flow::{Authorization, AuthorizationFlow, CallbackWait, FlowSettings};
pub use poller::{CallbackPoller, ProbeOutcome};
