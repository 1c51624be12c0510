//! # sync-core
//!
//! Pure sync lifecycle logic for mailsheet-sync.
//!
//! This crate holds everything that can be tested without I/O:
//! - [`SyncStatus`] - the trigger/result state machine
//! - [`format`] - display formatting for a completed sync
//!
//! The actual request to the sync endpoint is performed by sync-client,
//! which interprets the [`Action`]s this state machine produces.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod format;
mod state;

pub use state::{Action, Event, StatusEvent, SyncStatus};
