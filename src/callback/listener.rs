// ABOUTME: Ephemeral loopback HTTP listener receiving the OAuth redirect and status probes
// ABOUTME: Axum router over the capture store, with idempotent start/stop lifecycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

//! # Ephemeral Callback Listener
//!
//! Serves a single `GET /callback` path on `127.0.0.1`:
//!
//! | Request | Nothing captured | Already captured |
//! |---------|------------------|------------------|
//! | probe (`print` key present) | 500, not-ready message | 200, `key=value` lines |
//! | provider redirect | capture, 200 ack | ignored, 200 `key=value` lines |
//!
//! Lifecycle: `Unbound -> Listening -> Listening+Captured -> Stopped`.
//! [`CallbackListener::stop`] is safe in every state.

use std::mem;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use super::store::{CaptureOutcome, CaptureStore};
use crate::constants::callback::{
    CALLBACK_PATH, CAPTURED_ACK, LOOPBACK_HOST, NOT_READY_MESSAGE, PROBE_MARKER, SHUTDOWN_GRACE,
};
use crate::errors::ListenerError;
use crate::models::CallbackParameters;

/// Observable lifecycle state of the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerStatus {
    /// Not bound yet
    Unbound,
    /// Accepting requests, nothing captured
    Listening,
    /// Accepting requests, redirect captured
    Captured,
    /// Port released
    Stopped,
}

impl ListenerStatus {
    const fn describe(self) -> &'static str {
        match self {
            Self::Unbound => "unbound",
            Self::Listening => "listening",
            Self::Captured => "listening with a captured callback",
            Self::Stopped => "stopped",
        }
    }
}

/// Spawned server task and its shutdown trigger
struct RunningServer {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl RunningServer {
    /// Signal graceful shutdown and wait a bounded time for the task
    async fn shutdown(mut self) {
        // The receiver is gone only if the task already ended
        let _ = self.shutdown_tx.send(());

        match timeout(SHUTDOWN_GRACE, &mut self.task).await {
            Ok(Ok(())) => debug!(addr = %self.local_addr, "Callback listener stopped"),
            Ok(Err(e)) => warn!(error = %e, "Callback listener task ended abnormally"),
            Err(_) => {
                warn!(
                    grace_ms = SHUTDOWN_GRACE.as_millis() as u64,
                    "Callback listener did not stop in time, aborting it"
                );
                self.task.abort();
            }
        }
    }
}

enum ListenerState {
    Unbound,
    Listening(RunningServer),
    Stopped,
}

/// Local HTTP server receiving exactly one OAuth redirect
pub struct CallbackListener {
    store: Arc<CaptureStore>,
    state: ListenerState,
}

impl Default for CallbackListener {
    fn default() -> Self {
        Self::new()
    }
}

impl CallbackListener {
    /// Create an unbound listener with an empty capture store
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(CaptureStore::new()))
    }

    /// Create an unbound listener over an existing store
    #[must_use]
    pub fn with_store(store: Arc<CaptureStore>) -> Self {
        Self {
            store,
            state: ListenerState::Unbound,
        }
    }

    /// Bind `127.0.0.1:<port>` and start serving
    ///
    /// Port `0` lets the OS choose; the resolved address is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Bind`] if the port is unavailable and
    /// [`ListenerError::AlreadyStarted`] if the listener left the unbound state.
    pub async fn start(&mut self, port: u16) -> Result<SocketAddr, ListenerError> {
        if !matches!(self.state, ListenerState::Unbound) {
            return Err(ListenerError::AlreadyStarted {
                state: self.status().describe(),
            });
        }

        let requested = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
        let listener = TcpListener::bind(requested).await.map_err(|source| {
            error!(port, error = %source, "Failed to bind callback listener");
            ListenerError::Bind {
                addr: requested.to_string(),
                source,
            }
        })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ListenerError::LocalAddr { source })?;

        let router = callback_router(Arc::clone(&self.store));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx.await;
                debug!("Callback listener shutdown requested");
            };
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(shutdown)
                .await
            {
                error!(error = %e, "Callback listener stopped with an error");
            }
        });

        info!(callback.port = local_addr.port(), "Callback listener started");

        self.state = ListenerState::Listening(RunningServer {
            local_addr,
            shutdown_tx,
            task,
        });
        Ok(local_addr)
    }

    /// Release the port; safe to call in any state, never fails
    pub async fn stop(&mut self) {
        match mem::replace(&mut self.state, ListenerState::Stopped) {
            ListenerState::Listening(server) => server.shutdown().await,
            ListenerState::Unbound => debug!("Stop requested on a listener that never started"),
            ListenerState::Stopped => debug!("Callback listener already stopped"),
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub fn status(&self) -> ListenerStatus {
        match self.state {
            ListenerState::Unbound => ListenerStatus::Unbound,
            ListenerState::Listening(_) if self.store.is_captured() => ListenerStatus::Captured,
            ListenerState::Listening(_) => ListenerStatus::Listening,
            ListenerState::Stopped => ListenerStatus::Stopped,
        }
    }

    /// Bound address while listening
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        match &self.state {
            ListenerState::Listening(server) => Some(server.local_addr),
            ListenerState::Unbound | ListenerState::Stopped => None,
        }
    }

    /// Redirect target handed to the provider, with the resolved port
    #[must_use]
    pub fn callback_url(&self) -> Option<String> {
        self.local_addr().map(callback_url_for)
    }

    /// Status-probe URL for the polling orchestrator
    #[must_use]
    pub fn probe_url(&self) -> Option<String> {
        self.local_addr().map(probe_url_for)
    }

    /// Store shared with the request handlers
    #[must_use]
    pub fn store(&self) -> &Arc<CaptureStore> {
        &self.store
    }
}

impl Drop for CallbackListener {
    fn drop(&mut self) {
        if let ListenerState::Listening(server) = &self.state {
            server.task.abort();
        }
    }
}

/// `http://127.0.0.1:<port>/callback` for a bound address
#[must_use]
pub fn callback_url_for(addr: SocketAddr) -> String {
    format!("http://{LOOPBACK_HOST}:{}{CALLBACK_PATH}", addr.port())
}

/// Callback URL with the probe marker appended
#[must_use]
pub fn probe_url_for(addr: SocketAddr) -> String {
    format!("{}?{PROBE_MARKER}=true", callback_url_for(addr))
}

/// Router serving the callback path over the given store
pub fn callback_router(store: Arc<CaptureStore>) -> Router {
    Router::new()
        .route(CALLBACK_PATH, get(handle_callback))
        .with_state(store)
}

async fn handle_callback(
    State(store): State<Arc<CaptureStore>>,
    RawQuery(query): RawQuery,
) -> Response {
    let params = CallbackParameters::from_query(query.as_deref().unwrap_or_default());

    if params.contains(PROBE_MARKER) {
        return captured_response(&store);
    }

    if !params.is_line_safe() {
        warn!("OAuth redirect carries line breaks or '=' in a key, polled reads may differ from the redirect");
    }

    match store.capture(params) {
        CaptureOutcome::Captured => {
            info!("OAuth callback captured");
            (StatusCode::OK, CAPTURED_ACK).into_response()
        }
        CaptureOutcome::AlreadyCaptured => {
            warn!("Ignoring duplicate OAuth redirect, the first capture is kept");
            captured_response(&store)
        }
    }
}

/// Probe answer: the captured parameters, or "not ready"
fn captured_response(store: &CaptureStore) -> Response {
    store.get().map_or_else(
        || (StatusCode::INTERNAL_SERVER_ERROR, NOT_READY_MESSAGE).into_response(),
        |params| (StatusCode::OK, params.to_probe_body()).into_response(),
    )
}
