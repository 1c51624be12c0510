//! Sync lifecycle state machine for mailsheet-sync.
//!
//! This module provides a pure, side-effect-free state machine for the
//! trigger/result lifecycle. The state machine takes events as input and
//! produces a new state plus a list of actions to execute.
//!
//! The actual I/O (the request to the sync endpoint) is performed by
//! sync-client, not by this module. This enables instant unit testing
//! without network mocks.

use sync_types::SyncReport;

/// Sync lifecycle state machine - NO I/O, just state transitions.
///
/// Carrying the report inside [`SyncStatus::Completed`] makes the invariant
/// "a result exists iff the last sync completed" hold by construction, and
/// the busy flag is the projection [`SyncStatus::is_busy`], true iff
/// `Syncing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// No sync has been triggered yet.
    Idle,
    /// A sync request is outstanding.
    Syncing,
    /// The most recent sync completed successfully.
    Completed {
        /// Normalized outcome of the run.
        report: SyncReport,
    },
    /// The most recent sync failed (transport or protocol).
    Failed,
}

impl SyncStatus {
    /// Create a new state machine in the Idle state.
    pub fn new() -> Self {
        Self::Idle
    }

    /// Process an event and return the new state plus actions to execute.
    ///
    /// This is a pure function - no side effects. The caller (sync-client)
    /// is responsible for executing the returned actions.
    pub fn on_event(self, event: Event) -> (Self, Vec<Action>) {
        match (self, event) {
            // A trigger from any settled state starts a new run. The prior
            // report is dropped the instant Syncing is entered, not when
            // the new result arrives.
            (Self::Idle | Self::Completed { .. } | Self::Failed, Event::TriggerRequested) => (
                Self::Syncing,
                vec![
                    Action::StartRequest,
                    Action::EmitEvent(StatusEvent::SyncStarted),
                ],
            ),

            // Re-entrant trigger while a request is outstanding: no-op,
            // and crucially no second StartRequest.
            (Self::Syncing, Event::TriggerRequested) => (Self::Syncing, vec![]),

            // Endpoint resolution is the only way out of Syncing.
            (Self::Syncing, Event::RequestSucceeded { report }) => (
                Self::Completed {
                    report: report.clone(),
                },
                vec![Action::EmitEvent(StatusEvent::SyncCompleted { report })],
            ),
            (Self::Syncing, Event::RequestFailed { error }) => (
                Self::Failed,
                vec![Action::EmitEvent(StatusEvent::SyncFailed { error })],
            ),

            // Invalid transitions - stay in current state
            (state, _) => (state, vec![]),
        }
    }

    /// Check if a sync request is currently outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Syncing)
    }

    /// The report of the most recent sync, present iff `Completed`.
    pub fn result(&self) -> Option<&SyncReport> {
        match self {
            Self::Completed { report } => Some(report),
            _ => None,
        }
    }

    /// Human-readable status label for a status indicator.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Ready to sync",
            Self::Syncing => "Syncing...",
            Self::Completed { .. } => "Completed",
            Self::Failed => "Error",
        }
    }
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Events that can occur in the sync lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The user activated the trigger control.
    TriggerRequested,
    /// The endpoint returned a validated success response.
    RequestSucceeded {
        /// Normalized outcome of the run.
        report: SyncReport,
    },
    /// The request failed at the transport or protocol level.
    RequestFailed {
        /// Error message describing the failure.
        error: String,
    },
}

/// Actions to be executed by sync-client.
///
/// These are instructions, not side effects. The sync-client interprets
/// these and performs the actual I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Issue one request to the sync endpoint.
    StartRequest,
    /// Emit an event to the application.
    EmitEvent(StatusEvent),
}

/// Events emitted to the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// A sync run started.
    SyncStarted,
    /// A sync run completed successfully.
    SyncCompleted {
        /// Normalized outcome of the run.
        report: SyncReport,
    },
    /// A sync run failed.
    SyncFailed {
        /// Error message describing the failure.
        error: String,
    },
}
