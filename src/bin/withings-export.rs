// ABOUTME: Command line entry point exporting Withings activities to CSV
// ABOUTME: Parses options, initializes logging, runs the export and maps failures to exit codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

//! # Withings Export Binary
//!
//! ```text
//! withings-export --key <KEY> --secret <SECRET> [--out FILE] [--range DAYS] [--debug]
//! ```

use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use withings_export::config::{ExportConfig, ExportOptions, WaitMode};
use withings_export::errors::ExportError;
use withings_export::exporter::Exporter;
use withings_export::logging;

/// Exit status when the operator interrupts the run
const INTERRUPTED_EXIT_CODE: u8 = 130;

#[derive(Parser)]
#[command(name = "withings-export")]
#[command(version, about = "Export Withings activity data (date, steps, calories, elevation) to CSV")]
struct Args {
    /// Withings API key (falls back to WITHINGS_API_KEY)
    #[arg(long)]
    key: Option<String>,

    /// Secret of the Withings API key (falls back to WITHINGS_API_SECRET)
    #[arg(long)]
    secret: Option<String>,

    /// File to write the CSV to; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,

    /// Number of days to export, counted back from today, e.g. 30, 60, 90
    #[arg(long)]
    range: Option<u32>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Local callback port; 0 picks a free one (falls back to WITHINGS_CALLBACK_PORT)
    #[arg(long)]
    callback_port: Option<u16>,

    /// Delay between callback probes in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Give up waiting for the browser after this many seconds
    #[arg(long)]
    callback_timeout_secs: Option<u64>,

    /// How to wait for the callback: probe or direct
    #[arg(long)]
    wait_mode: Option<WaitMode>,
}

impl From<Args> for ExportOptions {
    fn from(args: Args) -> Self {
        Self {
            key: args.key,
            secret: args.secret,
            out: args.out,
            range_days: args.range,
            debug: args.debug,
            callback_port: args.callback_port,
            poll_interval_ms: args.poll_interval_ms,
            callback_timeout_secs: args.callback_timeout_secs,
            wait_mode: args.wait_mode,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init_from_env(args.debug) {
        eprintln!("Logging initialization failed: {e}");
    }

    let config = match ExportConfig::resolve(args.into()) {
        Ok(config) => config,
        Err(e) => return report(&ExportError::from(e)),
    };

    let prompt_on_stderr = config.output.is_stdout();
    let exporter = Exporter::new(config);

    let present = move |url: &str| {
        if prompt_on_stderr {
            eprintln!("Open the following URL in your browser:");
            eprintln!("{url}");
        } else {
            println!("Open the following URL in your browser:");
            println!("{url}");
        }
    };

    tokio::select! {
        result = exporter.run(present) => match result {
            Ok(rows) => {
                info!(rows, "Export finished");
                ExitCode::SUCCESS
            }
            Err(e) => report(&e),
        },
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, shutting down");
            ExitCode::from(INTERRUPTED_EXIT_CODE)
        }
    }
}

fn report(e: &ExportError) -> ExitCode {
    let code = e.code();
    error!(error.code = ?code, "{e}");
    eprintln!("{}", code.description());
    eprintln!("Error: {e}");
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("Caused by: {cause}");
        source = cause.source();
    }
    ExitCode::from(code.exit_code())
}
