//! HTTP endpoint on reqwest.
//!
//! POSTs to the configured sync resource with no request body and a
//! `Content-Type: application/json` header, matching the service contract.

use super::{EndpointError, SyncEndpoint};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use sync_types::SyncResponse;
use tracing::debug;

/// Configuration for [`HttpEndpoint`].
#[derive(Debug, Clone)]
pub struct HttpEndpointConfig {
    /// Full URL of the sync resource, e.g. `http://127.0.0.1:8000/sync`.
    pub sync_url: String,
    /// Optional per-request timeout. The observed contract has none; a
    /// timeout surfaces as [`EndpointError::Timeout`] and therefore as a
    /// failed sync.
    pub request_timeout: Option<Duration>,
}

impl HttpEndpointConfig {
    /// Create a configuration pointing at the given sync URL.
    pub fn new(sync_url: impl Into<String>) -> Self {
        Self {
            sync_url: sync_url.into(),
            request_timeout: None,
        }
    }

    /// Bound the wait for a response.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// HTTP implementation of [`SyncEndpoint`].
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: reqwest::Client,
    config: HttpEndpointConfig,
}

impl HttpEndpoint {
    /// Create a new HTTP endpoint.
    pub fn new(config: HttpEndpointConfig) -> Result<Self, EndpointError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| EndpointError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// The configured sync URL.
    pub fn sync_url(&self) -> &str {
        &self.config.sync_url
    }
}

#[async_trait]
impl SyncEndpoint for HttpEndpoint {
    async fn trigger_sync(&self) -> Result<SyncResponse, EndpointError> {
        debug!(url = %self.config.sync_url, "issuing sync request");

        let response = self
            .client
            .post(&self.config.sync_url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EndpointError::Timeout
                } else {
                    EndpointError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EndpointError::Status(status.as_u16()));
        }

        response
            .json::<SyncResponse>()
            .await
            .map_err(|e| EndpointError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sync_types::OUTCOME_SUCCESS;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn endpoint_for(server: &MockServer) -> HttpEndpoint {
        HttpEndpoint::new(HttpEndpointConfig::new(format!("{}/sync", server.uri()))).unwrap()
    }

    #[tokio::test]
    async fn posts_json_content_type_and_parses_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sync"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "processed_emails": 17,
                "timestamp": "2024-03-05T15:07:21.123456"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = endpoint_for(&server).await.trigger_sync().await.unwrap();

        assert_eq!(response.outcome, OUTCOME_SUCCESS);
        assert_eq!(response.processed_emails, Some(17));
    }

    #[tokio::test]
    async fn non_2xx_status_maps_to_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sync"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = endpoint_for(&server).await.trigger_sync().await;
        assert!(matches!(result, Err(EndpointError::Status(500))));
    }

    #[tokio::test]
    async fn undeserializable_body_maps_to_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sync"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = endpoint_for(&server).await.trigger_sync().await;
        assert!(matches!(result, Err(EndpointError::Malformed(_))));
    }

    #[tokio::test]
    async fn error_outcome_body_still_deserializes() {
        // A 2xx body with a non-success outcome is NOT a transport error;
        // the controller demotes it to Failed after validation.
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sync"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "error",
                "message": "credentials expired",
                "processed_emails": 0
            })))
            .mount(&server)
            .await;

        let response = endpoint_for(&server).await.trigger_sync().await.unwrap();
        assert_eq!(response.outcome, "error");
        assert_eq!(response.message.as_deref(), Some("credentials expired"));
    }

    #[tokio::test]
    async fn configured_timeout_maps_to_timeout_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sync"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "success"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = HttpEndpointConfig::new(format!("{}/sync", server.uri()))
            .with_timeout(Duration::from_millis(50));
        let endpoint = HttpEndpoint::new(config).unwrap();

        let result = endpoint.trigger_sync().await;
        assert!(matches!(result, Err(EndpointError::Timeout)));
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_network_error() {
        // Port 1 on localhost is essentially guaranteed to refuse.
        let endpoint =
            HttpEndpoint::new(HttpEndpointConfig::new("http://127.0.0.1:1/sync")).unwrap();
        let result = endpoint.trigger_sync().await;
        assert!(matches!(result, Err(EndpointError::Network(_))));
    }
}
