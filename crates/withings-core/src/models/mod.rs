// ABOUTME: Core data models for the OAuth handshake and the exported activity rows
// ABOUTME: Tokens, verifier, captured callback parameters and ActivityRow

//! Data models shared by the listener, the OAuth flow and the exporter.

/// Daily activity summary rows
pub mod activity;
/// Parameters captured from the provider redirect
pub mod callback;
/// OAuth 1.0a credentials
pub mod tokens;

pub use activity::ActivityRow;
pub use callback::CallbackParameters;
pub use tokens::{AccessToken, ConsumerCredentials, RequestToken, TokenCredentials, Verifier};
