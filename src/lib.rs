// ABOUTME: Main library entry point for the Withings activity exporter
// ABOUTME: OAuth 1.0a browser handshake over an ephemeral callback listener, signed queries, CSV export
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

#![deny(unsafe_code)]

//! # Withings Export
//!
//! Exports daily activity summaries (date, steps, calories, elevation) from
//! Withings, which authorizes third-party applications with OAuth 1.0a.
//!
//! ## Flow
//!
//! 1. A short-lived HTTP listener is bound on `127.0.0.1`
//! 2. A request token is obtained with the listener's callback URL
//! 3. The user opens the authorization URL in a browser
//! 4. The provider redirects to the listener, which captures the verifier
//! 5. The verifier is exchanged for an access token
//! 6. A signed `getactivity` query fetches the rows, written as CSV
//!
//! ## Architecture
//!
//! - **Callback**: capture store and loopback listener
//! - **`OAuth1`**: request signing and token endpoint calls
//! - **Authorization**: orchestrates the browser handshake
//! - **Providers**: Withings endpoints and the signed query client
//! - **Export**: date range and CSV output
//! - **Config**: command line and environment settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use withings_export::config::{ExportConfig, ExportOptions};
//! use withings_export::errors::ExportResult;
//! use withings_export::exporter::Exporter;
//!
//! #[tokio::main]
//! async fn main() -> ExportResult<()> {
//!     let config = ExportConfig::resolve(ExportOptions::default())?;
//!     let rows = Exporter::new(config)
//!         .run(|url| eprintln!("Open the following URL in your browser:\n{url}"))
//!         .await?;
//!     eprintln!("{rows} rows exported");
//!     Ok(())
//! }
//! ```

/// Error taxonomy with exit codes
pub use withings_core::errors;

/// Provider endpoints, callback protocol markers and export defaults
pub use withings_core::constants;

/// OAuth tokens, callback parameters and activity rows
pub use withings_core::models;

/// Browser handshake orchestration
pub mod authorization;

/// OAuth callback capture
pub mod callback;

/// Run configuration
pub mod config;

/// Date range and CSV output
pub mod export;

/// End-to-end export pipeline
pub mod exporter;

/// Structured logging setup
pub mod logging;

/// OAuth 1.0a consumer
pub mod oauth1;

/// Withings provider integration
pub mod providers;

/// Shared HTTP client constructors
pub mod utils;
