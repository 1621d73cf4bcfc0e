// ABOUTME: Configuration management module for the exporter run settings
// ABOUTME: Resolves command line options against environment variables and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

/// Options, environment fallbacks and validation
pub mod environment;

pub use environment::{ExportConfig, ExportOptions, WaitMode};
