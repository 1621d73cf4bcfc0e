// ABOUTME: Tests for exporter configuration resolution from options and environment
// ABOUTME: Credential fallbacks, defaults, endpoint overrides and validation failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serial_test::serial;
use withings_export::authorization::CallbackWait;
use withings_export::config::{ExportConfig, ExportOptions, WaitMode};
use withings_export::errors::{ConfigError, ErrorCode, ExportError};
use withings_export::export::OutputTarget;

const VARS: [&str; 5] = [
    "WITHINGS_API_KEY",
    "WITHINGS_API_SECRET",
    "WITHINGS_CALLBACK_PORT",
    "WITHINGS_OAUTH_URL",
    "WITHINGS_API_URL",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

fn with_credentials() -> ExportOptions {
    ExportOptions {
        key: Some("key".to_owned()),
        secret: Some("secret".to_owned()),
        ..ExportOptions::default()
    }
}

#[test]
#[serial]
fn defaults_apply_when_only_credentials_are_given() {
    clear_env();
    let config = ExportConfig::resolve(with_credentials()).unwrap();

    assert_eq!(config.range_days, 30);
    assert_eq!(config.output, OutputTarget::Stdout);
    assert_eq!(config.flow.callback_port, 0);
    assert_eq!(
        config.flow.wait,
        CallbackWait::Probe {
            interval: Duration::from_millis(500)
        }
    );
    assert!(config.flow.callback_timeout.is_none());
    assert_eq!(config.endpoints.oauth_base_url, "https://oauth.withings.com");
    assert_eq!(config.endpoints.api_base_url, "http://wbsapi.withings.net/v2");
}

#[test]
#[serial]
fn options_override_defaults() {
    clear_env();
    let config = ExportConfig::resolve(ExportOptions {
        out: Some(PathBuf::from("out.csv")),
        range_days: Some(90),
        callback_port: Some(8080),
        callback_timeout_secs: Some(120),
        wait_mode: Some(WaitMode::Direct),
        ..with_credentials()
    })
    .unwrap();

    assert_eq!(config.range_days, 90);
    assert_eq!(config.output, OutputTarget::File(PathBuf::from("out.csv")));
    assert_eq!(config.flow.callback_port, 8080);
    assert_eq!(config.flow.wait, CallbackWait::Direct);
    assert_eq!(config.flow.callback_timeout, Some(Duration::from_secs(120)));
}

#[test]
#[serial]
fn environment_supplies_credentials_and_endpoints() {
    clear_env();
    env::set_var("WITHINGS_API_KEY", "env-key");
    env::set_var("WITHINGS_API_SECRET", "env-secret");
    env::set_var("WITHINGS_CALLBACK_PORT", "9123");
    env::set_var("WITHINGS_OAUTH_URL", "http://127.0.0.1:9000");
    env::set_var("WITHINGS_API_URL", "http://127.0.0.1:9001");

    let config = ExportConfig::resolve(ExportOptions::default()).unwrap();
    clear_env();

    assert_eq!(config.consumer.key(), "env-key");
    assert_eq!(config.consumer.secret(), "env-secret");
    assert_eq!(config.flow.callback_port, 9123);
    assert_eq!(config.endpoints.oauth_base_url, "http://127.0.0.1:9000");
    assert_eq!(config.endpoints.api_base_url, "http://127.0.0.1:9001");
}

#[test]
#[serial]
fn missing_credentials_are_config_errors() {
    clear_env();
    let err = ExportConfig::resolve(ExportOptions::default()).unwrap_err();

    assert!(matches!(err, ConfigError::MissingCredential { flag: "key", .. }));
    assert_eq!(ExportError::from(err).code(), ErrorCode::ConfigInvalid);
}

#[test]
#[serial]
fn invalid_values_are_rejected() {
    clear_env();
    let cases = [
        ExportOptions {
            key: Some("  ".to_owned()),
            ..with_credentials()
        },
        ExportOptions {
            range_days: Some(0),
            ..with_credentials()
        },
        ExportOptions {
            poll_interval_ms: Some(0),
            ..with_credentials()
        },
        ExportOptions {
            callback_timeout_secs: Some(0),
            ..with_credentials()
        },
    ];

    for options in cases {
        let err = ExportConfig::resolve(options).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }), "{err}");
    }
}

#[test]
#[serial]
fn unparsable_port_in_environment_is_rejected() {
    clear_env();
    env::set_var("WITHINGS_CALLBACK_PORT", "not-a-port");
    let err = ExportConfig::resolve(with_credentials()).unwrap_err();
    clear_env();

    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            name: "callback-port",
            ..
        }
    ));
}

#[test]
#[serial]
fn summary_does_not_leak_the_secret() {
    clear_env();
    let config = ExportConfig::resolve(ExportOptions {
        secret: Some("top-secret-value".to_owned()),
        ..with_credentials()
    })
    .unwrap();

    assert!(!config.summary().contains("top-secret-value"));
    assert!(!format!("{config:?}").contains("top-secret-value"));
}
