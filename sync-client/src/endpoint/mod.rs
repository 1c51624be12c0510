//! Endpoint abstraction for mailsheet-sync.
//!
//! This module provides a pluggable endpoint layer that abstracts the
//! remote sync service (HTTP for production, mock for testing).
//!
//! # Design
//!
//! The endpoint trait is async and fire-and-await:
//! - `trigger_sync()` issues exactly one request and resolves with the raw
//!   response body or a transport-level error
//!
//! Validation of the body (outcome literal, field presence, timestamp
//! parsing) is not the endpoint's job; the controller applies it via
//! `SyncResponse::into_report`.

mod http;
mod mock;

pub use http::{HttpEndpoint, HttpEndpointConfig};
pub use mock::MockEndpoint;

use async_trait::async_trait;
use sync_types::SyncResponse;
use thiserror::Error;

/// Transport-level endpoint errors.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The request could not be completed (network unreachable, reset, ...).
    #[error("request failed: {0}")]
    Network(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("sync endpoint returned HTTP {0}")]
    Status(u16),

    /// The response body did not deserialize as a sync response.
    #[error("malformed response body: {0}")]
    Malformed(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,
}

/// Endpoint trait for triggering a sync run on the remote service.
///
/// Implementations handle the underlying request mechanism
/// (reqwest HTTP, mock, etc).
#[async_trait]
pub trait SyncEndpoint: Send + Sync {
    /// Issue one sync request and await its resolution.
    ///
    /// This is the single suspension point of a trigger; the caller yields
    /// until the endpoint responds or the transport fails.
    async fn trigger_sync(&self) -> Result<SyncResponse, EndpointError>;
}
