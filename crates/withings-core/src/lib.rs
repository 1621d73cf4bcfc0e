// ABOUTME: Core types and constants for the Withings activity exporter
// ABOUTME: Foundation crate with error taxonomy, OAuth/activity models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

#![deny(unsafe_code)]

//! # Withings Core
//!
//! Foundation crate shared by the exporter library and binary. It changes
//! rarely and carries no runtime (no tokio, no HTTP server).
//!
//! ## Modules
//!
//! - **errors**: `ExportError` and the per-stage error enums, with exit codes
//! - **models**: OAuth 1.0a tokens, captured callback parameters, activity rows
//! - **constants**: provider endpoints, callback protocol, export defaults

/// Error taxonomy with exit-code mapping
pub mod errors;

/// Provider endpoints, callback protocol markers and export defaults
pub mod constants;

/// OAuth tokens, callback parameters and activity rows
pub mod models;
