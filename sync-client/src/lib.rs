//! # sync-client
//!
//! Sync trigger controller for the mailsheet sync endpoint.
//!
//! This is the library applications use to trigger a one-shot sync run and
//! observe its outcome.
//!
//! ## Features
//!
//! - **One request per trigger**: re-entrant triggers while a request is
//!   outstanding are rejected without issuing a second request
//! - **Endpoint Abstraction**: pluggable endpoint layer (HTTP, mock)
//! - **Pure State Machine**: uses sync-core for side-effect-free logic
//! - **Publish-on-Mutation**: state changes go out on a watch channel, so
//!   observers are independent of any UI rendering technology
//!
//! ## Example
//!
//! ```ignore
//! use mailsheet_sync_client::{HttpEndpoint, HttpEndpointConfig, SyncController};
//!
//! let endpoint = HttpEndpoint::new(HttpEndpointConfig::new("http://127.0.0.1:8000/sync"))?;
//! let controller = SyncController::new(endpoint);
//!
//! let updates = controller.subscribe();
//! let report = controller.trigger_sync().await?;
//! println!("{} emails processed", report.processed_emails);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod controller;
pub mod endpoint;

pub use controller::{SyncController, SyncError};
pub use endpoint::{
    EndpointError, HttpEndpoint, HttpEndpointConfig, MockEndpoint, SyncEndpoint,
};
