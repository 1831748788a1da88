//! `reqwest`-backed request executor.
//!
//! A plain transport stores nothing, so it can never satisfy an
//! `only-if-cached` request. Those are answered locally with the 504
//! cache-miss sentinel, exactly as a caching client with an empty cache
//! would, and never reach the network.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::collaborators::{Clock, RequestExecutor, SystemClock};
use crate::config::ClientConfig;
use crate::error::SwrError;
use crate::request::SwrRequest;
use crate::response::SwrResponse;

/// Production transport adapter
pub struct ReqwestExecutor {
    client: reqwest::Client,
    clock: Arc<dyn Clock>,
}

impl ReqwestExecutor {
    /// Build an executor from client configuration, stamping responses with
    /// the system clock.
    pub fn new(config: &ClientConfig) -> Result<Self, SwrError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &ClientConfig, clock: Arc<dyn Clock>) -> Result<Self, SwrError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SwrError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, clock })
    }
}

#[async_trait]
impl RequestExecutor for ReqwestExecutor {
    async fn execute(&self, request: SwrRequest) -> Result<SwrResponse, SwrError> {
        if request.cache_control.only_if_cached {
            tracing::trace!(uri = %request.uri, "No local cache, answering only-if-cached with 504");
            return Ok(SwrResponse::cache_miss(self.clock.now()));
        }

        let response = self
            .client
            .request(request.method.clone(), request.uri.to_string())
            .headers(request.wire_headers())
            .body(request.body.clone())
            .send()
            .await?;

        let received_at = self.clock.now();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        tracing::debug!(
            uri = %request.uri,
            status = status.as_u16(),
            bytes = body.len(),
            "Network response received"
        );

        Ok(SwrResponse::new(status, headers, body, received_at))
    }
}
