//! SyncController - the main interface for mailsheet-sync.
//!
//! This module provides [`SyncController`], the primary API for applications
//! to trigger a one-shot sync run and observe its outcome.
//!
//! # Architecture
//!
//! SyncController uses a pure state machine (from sync-core) for lifecycle
//! logic and performs the actual I/O via the SyncEndpoint trait.
//!
//! ```text
//! Application → SyncController → SyncEndpoint → HTTP
//!                     ↓
//!               sync-core (pure state machine)
//! ```
//!
//! State changes are published on a watch channel the moment they happen,
//! so any observer (a UI layer, a test) can re-render from the stream
//! without the controller knowing about rendering at all.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use sync_core::{Event, SyncStatus};
use sync_types::{ProtocolError, SyncReport};
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use crate::endpoint::{EndpointError, SyncEndpoint};

/// Controller errors.
///
/// Every variant leaves the controller in a well-defined state: `Busy` and
/// `Closed` leave it untouched, the rest resolve to `Failed`.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A sync request is already outstanding; the trigger was a no-op.
    #[error("a sync is already in progress")]
    Busy,

    /// The controller was closed; no request was issued or its resolution
    /// was dropped.
    #[error("controller is closed")]
    Closed,

    /// Transport-level failure.
    #[error("endpoint error: {0}")]
    Endpoint(#[from] EndpointError),

    /// Well-formed response that violated the contract.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// The main sync controller.
///
/// Owns the lifecycle state and mediates exactly one request/response cycle
/// with the sync endpoint per trigger.
pub struct SyncController<E: SyncEndpoint> {
    endpoint: E,
    state: Arc<Mutex<SyncStatus>>,
    publisher: watch::Sender<SyncStatus>,
    closed: AtomicBool,
}

impl<E: SyncEndpoint> SyncController<E> {
    /// Create a new controller in the Idle state.
    pub fn new(endpoint: E) -> Self {
        let (publisher, _) = watch::channel(SyncStatus::new());
        Self {
            endpoint,
            state: Arc::new(Mutex::new(SyncStatus::new())),
            publisher,
            closed: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current lifecycle state.
    pub async fn status(&self) -> SyncStatus {
        self.state.lock().await.clone()
    }

    /// Check if a sync request is currently outstanding.
    pub async fn is_busy(&self) -> bool {
        self.state.lock().await.is_busy()
    }

    /// Subscribe to state changes (publish-on-mutation).
    ///
    /// The receiver always holds the latest state; a UI layer can disable
    /// its trigger control whenever the observed state is busy.
    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.publisher.subscribe()
    }

    /// Mark the controller closed (view teardown).
    ///
    /// An outstanding request is not cancelled; its resolution, when it
    /// arrives, is ignored rather than applied to discarded state.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Check if the controller has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Trigger one sync run.
    ///
    /// Issues exactly one request to the endpoint. If a request is already
    /// outstanding the call is a no-op that returns [`SyncError::Busy`]
    /// without touching state. All transport and protocol failures are
    /// absorbed into the `Failed` state; the returned `Result` carries the
    /// same outcome as a value, and callers that only watch the published
    /// state are free to ignore it.
    pub async fn trigger_sync(&self) -> Result<SyncReport, SyncError> {
        if self.is_closed() {
            return Err(SyncError::Closed);
        }

        // Busy guard and entry into Syncing under one lock, so two racing
        // triggers can never both start a request. Entering Syncing also
        // drops any stale report immediately.
        {
            let mut state = self.state.lock().await;
            if state.is_busy() {
                debug!("trigger ignored: a sync is already in progress");
                return Err(SyncError::Busy);
            }
            let (next, _actions) = state.clone().on_event(Event::TriggerRequested);
            *state = next.clone();
            self.publisher.send_replace(next);
        }

        // The single suspension point: one request per trigger, no retry.
        let outcome = self.endpoint.trigger_sync().await;
        let resolution: Result<SyncReport, SyncError> = match outcome {
            Ok(response) => response.into_report().map_err(SyncError::from),
            Err(error) => Err(SyncError::from(error)),
        };

        if self.is_closed() {
            debug!("controller closed mid-flight, dropping resolution");
            return Err(SyncError::Closed);
        }

        // Every resolution path funnels through this tail, so Syncing (and
        // with it the busy projection) never outlives the call.
        let event = match &resolution {
            Ok(report) => Event::RequestSucceeded {
                report: report.clone(),
            },
            Err(error) => {
                warn!(%error, "sync failed");
                Event::RequestFailed {
                    error: error.to_string(),
                }
            }
        };
        {
            let mut state = self.state.lock().await;
            let (next, _actions) = state.clone().on_event(event);
            *state = next.clone();
            self.publisher.send_replace(next);
        }

        resolution
    }

    /// Get a reference to the underlying endpoint (for testing).
    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }
}
