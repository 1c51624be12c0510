//! Mock endpoint for testing.
//!
//! Allows queueing canned responses, counting issued requests, and holding
//! a request in flight so tests can observe mid-flight state.

use super::{EndpointError, SyncEndpoint};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use sync_types::SyncResponse;
use tokio::sync::Notify;

/// Mock endpoint for testing.
///
/// Clones share state, so tests can keep a handle for inspection while the
/// controller owns another.
#[derive(Debug, Clone, Default)]
pub struct MockEndpoint {
    inner: Arc<Mutex<MockEndpointInner>>,
    gate: Arc<Notify>,
}

#[derive(Debug, Default)]
struct MockEndpointInner {
    trigger_count: usize,
    hold_next: bool,
    responses: VecDeque<Result<SyncResponse, EndpointError>>,
}

impl MockEndpoint {
    /// Create a new mock endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response body for the next `trigger_sync()` call.
    pub fn queue_response(&self, response: SyncResponse) {
        let mut inner = self.inner.lock().unwrap();
        inner.responses.push_back(Ok(response));
    }

    /// Queue a transport-level failure for the next `trigger_sync()` call.
    pub fn queue_failure(&self, error: EndpointError) {
        let mut inner = self.inner.lock().unwrap();
        inner.responses.push_back(Err(error));
    }

    /// Number of requests issued so far.
    pub fn trigger_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.trigger_count
    }

    /// Hold the next request in flight until [`MockEndpoint::release`].
    ///
    /// The request still counts toward [`MockEndpoint::trigger_count`] the
    /// moment it is issued.
    pub fn hold_next(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.hold_next = true;
    }

    /// Release a held request so it resolves with the queued response.
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl SyncEndpoint for MockEndpoint {
    async fn trigger_sync(&self) -> Result<SyncResponse, EndpointError> {
        // Count the request and take the hold flag without keeping the
        // lock across the await below.
        let should_hold = {
            let mut inner = self.inner.lock().unwrap();
            inner.trigger_count += 1;
            std::mem::take(&mut inner.hold_next)
        };

        if should_hold {
            self.gate.notified().await;
        }

        let mut inner = self.inner.lock().unwrap();
        inner
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(EndpointError::Network("no queued response".to_string())))
    }
}
