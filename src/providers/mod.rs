// ABOUTME: Fitness data provider integration for the Withings activity API
// ABOUTME: Provider descriptor with endpoint overrides and the signed query client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

/// Signed activity queries
pub mod query_client;
/// Withings endpoints and OAuth 1.0a descriptor
pub mod withings;

pub use query_client::{parse_envelope, ActivityQuery, ActivityRows, SignedQueryClient};
pub use withings::{WithingsApi, WithingsEndpoints};
