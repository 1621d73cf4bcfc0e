// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Provider endpoints, local callback protocol markers and export defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

//! Constants module
//!
//! Constants are grouped by domain rather than collected in one flat list.

/// OAuth protocol parameter names and endpoints
pub mod oauth;

pub use oauth::*;

/// Service identifiers used in structured logs
pub mod service_names {
    /// Name reported by the exporter binary
    pub const WITHINGS_EXPORT: &str = "withings-export";
}

/// Local callback listener protocol
pub mod callback {
    use std::time::Duration;

    /// Single path exposed by the callback listener
    pub const CALLBACK_PATH: &str = "/callback";

    /// Query key that marks a status probe instead of a provider redirect
    pub const PROBE_MARKER: &str = "print";

    /// Loopback host the listener binds to and advertises
    pub const LOOPBACK_HOST: &str = "127.0.0.1";

    /// Port 0 lets the OS pick a free port
    pub const DEFAULT_CALLBACK_PORT: u16 = 0;

    /// Interval between two probes while the user authorizes in the browser
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

    /// Upper bound on waiting for the listener task after shutdown was signalled
    pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

    /// Body returned to a probe while nothing has been captured
    pub const NOT_READY_MESSAGE: &str = "No data available yet";

    /// Body returned to the browser after the redirect was captured
    pub const CAPTURED_ACK: &str =
        "Authorization received. You can close this window and return to the terminal.";
}

/// Data export defaults
pub mod export {
    /// Header line of the CSV output
    pub const CSV_HEADER: &str = "Date,Steps,Calories,Elevation";

    /// Default number of days exported, counted back from today
    pub const DEFAULT_RANGE_DAYS: u32 = 30;

    /// Date format used by the provider for `startdateymd`/`enddateymd`
    pub const YMD_FORMAT: &str = "%Y-%m-%d";
}

/// Environment variable names read by the configuration layer
pub mod env_keys {
    /// Consumer key of the registered Withings application
    pub const API_KEY: &str = "WITHINGS_API_KEY";
    /// Consumer secret of the registered Withings application
    pub const API_SECRET: &str = "WITHINGS_API_SECRET";
    /// Local port for the callback listener
    pub const CALLBACK_PORT: &str = "WITHINGS_CALLBACK_PORT";
    /// Override for the OAuth host (request/authorize/access endpoints)
    pub const OAUTH_URL: &str = "WITHINGS_OAUTH_URL";
    /// Override for the data API base URL
    pub const API_URL: &str = "WITHINGS_API_URL";
}
