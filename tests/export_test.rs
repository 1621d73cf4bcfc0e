// ABOUTME: Tests for CSV export, output targets and the end-to-end export pipeline
// ABOUTME: Header and row rendering, file output, open failures, full run against a fake provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use withings_export::authorization::{CallbackWait, FlowSettings};
use withings_export::config::ExportConfig;
use withings_export::errors::{ErrorCode, ExportError, OutputError};
use withings_export::export::{CsvExporter, OutputTarget};
use withings_export::exporter::Exporter;
use withings_export::providers::parse_envelope;

mod common;

use common::{FakeProvider, ONE_ROW_ENVELOPE};

#[test]
fn envelope_row_renders_after_header() {
    let rows = parse_envelope(
        r#"{"body":{"activities":[{"date":"2024-01-01","steps":100,"calories":50,"elevation":2}]}}"#,
    )
    .unwrap();

    let mut exporter = CsvExporter::new(Vec::new());
    assert_eq!(exporter.write_rows(rows).unwrap(), 1);

    let csv = String::from_utf8(exporter.into_inner()).unwrap();
    assert_eq!(csv, "Date,Steps,Calories,Elevation\n2024-01-01,100,50,2\n");
}

#[test]
fn odd_field_types_pass_through_to_csv() {
    let rows = parse_envelope(
        r#"{"status":0,"body":{"activities":[
            {"date":"2024-01-01","steps":100,"calories":50,"elevation":2},
            {"date":"2024-01-02","steps":"250","calories":12.5,"elevation":"n/a"},
            {"date":"2024-01-03","steps":300,"calories":60,"elevation":4}
        ]}}"#,
    )
    .unwrap();

    let mut exporter = CsvExporter::new(Vec::new());
    assert_eq!(exporter.write_rows(rows).unwrap(), 3);

    let csv = String::from_utf8(exporter.into_inner()).unwrap();
    assert_eq!(
        csv,
        "Date,Steps,Calories,Elevation\n\
         2024-01-01,100,50,2\n\
         2024-01-02,250,12.5,n/a\n\
         2024-01-03,300,60,4\n"
    );
}

#[test]
fn empty_collection_writes_header_only() {
    let mut exporter = CsvExporter::new(Vec::new());
    assert_eq!(exporter.write_rows(Vec::new()).unwrap(), 0);
    assert_eq!(
        String::from_utf8(exporter.into_inner()).unwrap(),
        "Date,Steps,Calories,Elevation\n"
    );
}

#[test]
fn file_target_creates_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("activities.csv");
    let target = OutputTarget::from_path(Some(path.clone()));
    assert!(!target.is_stdout());

    let written = target
        .write_rows(parse_envelope(ONE_ROW_ENVELOPE).unwrap())
        .unwrap();

    assert_eq!(written, 1);
    assert_eq!(
        fs::read_to_string(path).unwrap(),
        "Date,Steps,Calories,Elevation\n2024-01-01,100,50,2\n"
    );
}

#[test]
fn unwritable_path_is_an_output_error() {
    let dir = TempDir::new().unwrap();
    let target = OutputTarget::File(dir.path().join("missing").join("activities.csv"));

    let err = target.write_rows(Vec::new()).unwrap_err();

    assert!(matches!(err, OutputError::Open { .. }));
    assert_eq!(ExportError::from(err).exit_code(), 9);
}

#[tokio::test]
async fn full_run_writes_csv_file() {
    let provider = FakeProvider::start().await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export.csv");

    let config = ExportConfig {
        consumer: common::consumer(),
        output: OutputTarget::File(path.clone()),
        range_days: 30,
        debug: false,
        flow: FlowSettings {
            wait: CallbackWait::Direct,
            callback_timeout: Some(Duration::from_secs(10)),
            ..FlowSettings::default()
        },
        endpoints: provider.endpoints(),
    };

    let rows = Exporter::new(config)
        .run(provider.browser("oauth_verifier=ABC123&userid=42"))
        .await
        .unwrap();

    assert_eq!(rows, 1);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Date,Steps,Calories,Elevation\n2024-01-01,100,50,2\n"
    );
    let query = &provider.calls(common::MEASURE_PATH)[0];
    assert_eq!(query.param("userid"), Some("42"));
    assert!(query.signature_valid);
}

#[tokio::test]
async fn failed_run_writes_nothing() {
    let provider = FakeProvider::start().await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export.csv");

    let config = ExportConfig {
        consumer: common::consumer(),
        output: OutputTarget::File(path.clone()),
        range_days: 30,
        debug: false,
        flow: FlowSettings {
            wait: CallbackWait::Direct,
            callback_timeout: Some(Duration::from_secs(10)),
            ..FlowSettings::default()
        },
        endpoints: provider.endpoints(),
    };

    let err = Exporter::new(config)
        .run(provider.browser("userid=42"))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::MissingVerifier);
    assert!(!path.exists());
}
