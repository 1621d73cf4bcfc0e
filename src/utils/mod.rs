// ABOUTME: Utility module for shared helpers
// ABOUTME: Currently hosts the HTTP client constructors used by the OAuth flow and queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

/// HTTP client constructors with per-purpose timeouts
pub mod http_client;
