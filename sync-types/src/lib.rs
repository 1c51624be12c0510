//! # sync-types
//!
//! Wire format types for the mailsheet sync endpoint contract.
//!
//! This crate provides the foundational types used across all mailsheet-sync
//! crates:
//! - [`SyncResponse`], [`Timestamp`] - Raw endpoint response body
//! - [`SyncReport`] - Normalized outcome of a successful sync
//! - [`ProtocolError`] - Violations of the response contract

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod report;
mod response;

pub use error::ProtocolError;
pub use report::SyncReport;
pub use response::{SyncResponse, Timestamp, OUTCOME_SUCCESS};
