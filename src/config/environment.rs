// ABOUTME: Exporter configuration resolved from command line options and environment variables
// ABOUTME: Credential fallbacks, callback tunables, endpoint overrides and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

//! Environment-backed configuration for one export run
//!
//! Command line values win; environment variables fill the gaps; constants
//! supply the rest. Validation happens before any network activity.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, info};

use crate::authorization::{CallbackWait, FlowSettings};
use crate::constants::callback::{DEFAULT_CALLBACK_PORT, DEFAULT_POLL_INTERVAL};
use crate::constants::env_keys;
use crate::constants::export::DEFAULT_RANGE_DAYS;
use crate::errors::ConfigError;
use crate::export::OutputTarget;
use crate::models::ConsumerCredentials;
use crate::providers::WithingsEndpoints;

/// Strategy used to learn about the browser redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitMode {
    /// Poll the listener's probe endpoint over loopback HTTP
    #[default]
    Probe,
    /// Await the capture store in-process
    Direct,
}

impl FromStr for WaitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "probe" | "poll" => Ok(Self::Probe),
            "direct" => Ok(Self::Direct),
            other => Err(format!("unknown wait mode '{other}', expected probe or direct")),
        }
    }
}

impl fmt::Display for WaitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Probe => write!(f, "probe"),
            Self::Direct => write!(f, "direct"),
        }
    }
}

/// Raw options as given on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// `--key`
    pub key: Option<String>,
    /// `--secret`
    pub secret: Option<String>,
    /// `--out`
    pub out: Option<PathBuf>,
    /// `--range`
    pub range_days: Option<u32>,
    /// `--debug`
    pub debug: bool,
    /// `--callback-port`
    pub callback_port: Option<u16>,
    /// `--poll-interval-ms`
    pub poll_interval_ms: Option<u64>,
    /// `--callback-timeout-secs`
    pub callback_timeout_secs: Option<u64>,
    /// `--wait-mode`
    pub wait_mode: Option<WaitMode>,
}

/// Validated configuration of one export run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Application credentials
    pub consumer: ConsumerCredentials,
    /// CSV destination
    pub output: OutputTarget,
    /// Days exported, counted back from today
    pub range_days: u32,
    /// Verbose logging requested
    pub debug: bool,
    /// Authorization flow tunables
    pub flow: FlowSettings,
    /// Provider hosts
    pub endpoints: WithingsEndpoints,
}

impl ExportConfig {
    /// Merge options with environment fallbacks and validate the result
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] when key or secret is absent
    /// everywhere and [`ConfigError::InvalidValue`] for unusable values.
    pub fn resolve(options: ExportOptions) -> Result<Self, ConfigError> {
        let key = options
            .key
            .or_else(|| env_var(env_keys::API_KEY))
            .ok_or(ConfigError::MissingCredential {
                name: "API key",
                flag: "key",
                env: env_keys::API_KEY,
            })?;
        let secret = options
            .secret
            .or_else(|| env_var(env_keys::API_SECRET))
            .ok_or(ConfigError::MissingCredential {
                name: "API secret",
                flag: "secret",
                env: env_keys::API_SECRET,
            })?;

        let callback_port = match options.callback_port {
            Some(port) => port,
            None => env_parse(env_keys::CALLBACK_PORT, "callback-port")?
                .unwrap_or(DEFAULT_CALLBACK_PORT),
        };

        let wait = match options.wait_mode.unwrap_or_default() {
            WaitMode::Probe => CallbackWait::Probe {
                interval: options
                    .poll_interval_ms
                    .map_or(DEFAULT_POLL_INTERVAL, Duration::from_millis),
            },
            WaitMode::Direct => CallbackWait::Direct,
        };

        let config = Self {
            consumer: ConsumerCredentials::new(key, secret),
            output: OutputTarget::from_path(options.out),
            range_days: options.range_days.unwrap_or(DEFAULT_RANGE_DAYS),
            debug: options.debug,
            flow: FlowSettings {
                callback_port,
                wait,
                callback_timeout: options.callback_timeout_secs.map(Duration::from_secs),
            },
            endpoints: WithingsEndpoints::from_env(),
        };

        config.validate()?;
        debug!(config = %config.summary(), "Configuration resolved");
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.consumer.key().trim().is_empty() {
            return Err(invalid("key", "must not be empty"));
        }
        if self.consumer.secret().trim().is_empty() {
            return Err(invalid("secret", "must not be empty"));
        }
        if self.range_days == 0 {
            return Err(invalid("range", "must be at least one day"));
        }
        if let CallbackWait::Probe { interval } = self.flow.wait {
            if interval.is_zero() {
                return Err(invalid("poll-interval-ms", "must be greater than zero"));
            }
        }
        if self.flow.callback_timeout.is_some_and(|limit| limit.is_zero()) {
            return Err(invalid("callback-timeout-secs", "must be greater than zero"));
        }
        Ok(())
    }

    /// One-line summary for logs, without secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "key={}, range_days={}, output={:?}, callback_port={}, wait={:?}, timeout={:?}, oauth={}, api={}",
            self.consumer.key(),
            self.range_days,
            self.output,
            self.flow.callback_port,
            self.flow.wait,
            self.flow.callback_timeout,
            self.endpoints.oauth_base_url,
            self.endpoints.api_base_url,
        )
    }
}

fn invalid(name: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        reason: reason.to_owned(),
    }
}

/// Non-empty environment variable
fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an optional environment variable
fn env_parse<T: FromStr>(key: &str, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T::Err: fmt::Display,
{
    env_var(key)
        .map(|raw| {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                name,
                reason: format!("{key}={raw}: {e}"),
            })
        })
        .transpose()
}
