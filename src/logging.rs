// ABOUTME: Logging configuration and structured logging setup for the exporter
// ABOUTME: Configures log level, format, and a stderr writer that keeps CSV on stdout clean
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

//! Structured logging configuration
//!
//! Logs always go to stderr: stdout may carry the CSV export.

use crate::constants::service_names;
use anyhow::Result;
use std::env;
use std::io;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` lines, for piping into log processors
    Json,
    /// Full human format with targets
    Pretty,
    /// Single-line human format
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Compact,
            include_location: false,
            include_spans: false,
            service_name: service_names::WITHINGS_EXPORT.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") => LogFormat::Pretty,
            _ => LogFormat::Compact,
        };

        Self {
            level,
            format,
            include_location: env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            ..Self::default()
        }
    }

    /// Force debug level, as requested by `--debug`
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        if debug {
            "debug".clone_into(&mut self.level);
        }
        self
    }

    /// Build the filter: a full `RUST_LOG` directive list is used verbatim,
    /// a bare level applies to our crates with dependency noise reduced
    fn env_filter(&self) -> EnvFilter {
        if self.level.contains('=') {
            return EnvFilter::new(&self.level);
        }

        [
            "hyper=warn".to_owned(),
            "hyper_util=warn".to_owned(),
            "reqwest=warn".to_owned(),
            "axum=warn".to_owned(),
            format!("withings_export={}", self.level),
            format!("withings_core={}", self.level),
        ]
        .iter()
        .filter_map(|directive| directive.parse().ok())
        .fold(EnvFilter::new("warn"), EnvFilter::add_directive)
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber was already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(span_events)
                    .json();

                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(span_events);

                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_file(false)
                    .with_line_number(false)
                    .with_target(false)
                    .with_writer(io::stderr)
                    .with_span_events(FmtSpan::NONE);

                registry.with(compact_layer).try_init()?;
            }
        }

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            log.level = %self.level,
            log.format = ?self.format,
            "Withings exporter starting up"
        );

        Ok(())
    }
}

/// Initialize logging from environment, optionally forcing debug level
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env(debug: bool) -> Result<()> {
    LoggingConfig::from_env().with_debug(debug).init()
}
