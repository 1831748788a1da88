//! Dispatch of stale-while-revalidate refresh requests.
//!
//! The refresh result is never returned to the caller. What differs between
//! the modes is whether the caller waits for it.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::collaborators::RequestExecutor;
use crate::error::SwrError;
use crate::metrics::SwrMetrics;
use crate::request::SwrRequest;
use crate::response::SwrResponse;

/// How a stale-but-servable hit triggers its refresh.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RevalidationMode {
    /// Await the refresh inside the call, then discard its result.
    /// The caller pays the refresh latency.
    #[default]
    Inline,
    /// Spawn the refresh on the current tokio runtime and return at once.
    /// Falls back to `Inline` outside a runtime.
    Background,
}

/// Issues refresh requests according to a [`RevalidationMode`].
#[derive(Clone)]
pub struct Revalidator {
    executor: Arc<dyn RequestExecutor>,
    mode: RevalidationMode,
    log_failures: bool,
}

impl Revalidator {
    pub fn new(executor: Arc<dyn RequestExecutor>, mode: RevalidationMode, log_failures: bool) -> Self {
        Self {
            executor,
            mode,
            log_failures,
        }
    }

    pub fn mode(&self) -> RevalidationMode {
        self.mode
    }

    /// Fire the refresh request. Never fails, never returns its response.
    pub async fn dispatch(&self, request: SwrRequest) {
        match self.mode {
            RevalidationMode::Inline => self.run_inline(request).await,
            RevalidationMode::Background => match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let executor = Arc::clone(&self.executor);
                    let log_failures = self.log_failures;
                    // Detached: the handle is dropped and the task is never awaited
                    drop(handle.spawn(async move {
                        let uri = request.uri.to_string();
                        let result = executor.execute(request).await;
                        report(&uri, result, log_failures);
                    }));
                }
                Err(_) => {
                    tracing::debug!("No tokio runtime for background revalidation, running inline");
                    self.run_inline(request).await;
                }
            },
        }
    }

    async fn run_inline(&self, request: SwrRequest) {
        let uri = request.uri.to_string();
        let result = self.executor.execute(request).await;
        report(&uri, result, self.log_failures);
    }
}

fn report(uri: &str, result: Result<SwrResponse, SwrError>, log_failures: bool) {
    let metrics = SwrMetrics::global();
    match result {
        Ok(response) => {
            metrics.record_revalidation(true);
            tracing::debug!(uri = %uri, status = response.status.as_u16(), "Revalidation completed");
        }
        Err(e) => {
            metrics.record_revalidation(false);
            if log_failures {
                tracing::warn!(uri = %uri, error = %e, "Revalidation failed");
            }
        }
    }
}
