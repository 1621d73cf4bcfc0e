// ABOUTME: Error types for the ephemeral OAuth callback listener
// ABOUTME: Covers bind failures and invalid lifecycle transitions

use std::io;

/// Errors raised while starting the callback listener
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// The local port could not be bound
    #[error("Failed to bind callback listener on {addr}")]
    Bind {
        /// Address that was requested
        addr: String,
        /// Underlying socket error
        #[source]
        source: io::Error,
    },

    /// The bound socket did not report its local address
    #[error("Failed to resolve callback listener address")]
    LocalAddr {
        /// Underlying socket error
        #[source]
        source: io::Error,
    },

    /// `start` was called on a listener that already left the unbound state
    #[error("Callback listener can not be started while {state}")]
    AlreadyStarted {
        /// Current lifecycle state
        state: &'static str,
    },
}
