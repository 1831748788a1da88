//! Stale-while-revalidate policy engine.
//!
//! [`SwrPolicy`] sits in front of a caching HTTP client. For every request it
//! asks the client's cache for a stored response (a cache-only probe), places
//! `now` in that response's SWR window and then either:
//! - returns the cached response (fresh),
//! - returns the cached response and fires a forced-network refresh (stale),
//! - forwards a forced-network request and returns its outcome (expired).
//!
//! Requests that already carry `no-cache` or `only-if-cached` are passed
//! through untouched.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use swr_interceptor::client::ReqwestExecutor;
//! use swr_interceptor::config::ClientConfig;
//! use swr_interceptor::request::SwrRequest;
//! use swr_interceptor::swr::{RevalidationMode, SwrPolicy};
//!
//! # async fn run() -> Result<(), swr_interceptor::error::SwrError> {
//! let executor = Arc::new(ReqwestExecutor::new(&ClientConfig::default())?);
//! let policy = SwrPolicy::builder(executor)
//!     .revalidation(RevalidationMode::Background)
//!     .build();
//!
//! let request = SwrRequest::get("http://example.com/feed".parse().unwrap());
//! let response = policy.decide(request).await?;
//! println!("{}", response.status);
//! # Ok(())
//! # }
//! ```

mod probe;
mod revalidate;

pub use revalidate::{RevalidationMode, Revalidator};

use std::sync::Arc;

use crate::cache::Freshness;
use crate::collaborators::{
    Chain, Clock, DiagnosticSink, ExecutorChain, RequestExecutor, SystemClock,
};
use crate::config::SwrConfig;
use crate::constants::DEFAULT_LOG_REVALIDATION_FAILURES;
use crate::error::SwrError;
use crate::metrics::SwrMetrics;
use crate::request::{RequestCacheControl, SwrRequest};
use crate::response::SwrResponse;

/// The SWR decision engine.
///
/// Holds only immutable collaborator handles; safe to share across tasks.
#[derive(Clone)]
pub struct SwrPolicy {
    executor: Arc<dyn RequestExecutor>,
    clock: Arc<dyn Clock>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
    revalidator: Revalidator,
}

impl SwrPolicy {
    /// Policy with the system clock, no diagnostic sink and inline revalidation.
    pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        Self::builder(executor).build()
    }

    pub fn builder(executor: Arc<dyn RequestExecutor>) -> SwrPolicyBuilder {
        SwrPolicyBuilder::new(executor)
    }

    pub fn revalidation_mode(&self) -> RevalidationMode {
        self.revalidator.mode()
    }

    /// Run a request through the policy, using the executor as the rest of
    /// the chain.
    pub async fn decide(&self, request: SwrRequest) -> Result<SwrResponse, SwrError> {
        let chain = ExecutorChain::new(request, self.executor.as_ref());
        self.intercept(&chain).await
    }

    /// Run the request held by `chain` through the policy.
    ///
    /// Pass-through and expired requests go to `chain.proceed`; the probe and
    /// refresh requests go to the executor.
    pub async fn intercept(&self, chain: &dyn Chain) -> Result<SwrResponse, SwrError> {
        let metrics = SwrMetrics::global();
        let request = chain.request();

        // The caller already chose network-only or cache-only
        if request.effective_cache_control().is_explicit() {
            metrics.record_bypass();
            tracing::debug!(uri = %request.uri, outcome = "bypass", "Explicit cache-control, passing through");
            return chain.proceed(request.clone()).await;
        }

        let Some(cached) = self.probe_cache(request).await? else {
            metrics.record_miss();
            tracing::debug!(uri = %request.uri, outcome = "miss", "No cached response");
            return chain.proceed(request.clone()).await;
        };

        let window = cached.window();
        let now = self.clock.now();
        let freshness = window.classify(now);

        metrics.record_freshness(freshness);
        tracing::debug!(
            uri = %request.uri,
            outcome = %freshness,
            now = now,
            fresh_until = window.fresh_until,
            stale_until = window.stale_until,
            "SWR decision"
        );

        match freshness {
            Freshness::Fresh => Ok(cached),
            Freshness::StaleWhileRevalidate => {
                self.revalidator
                    .dispatch(request.with_cache_control(RequestCacheControl::FORCE_NETWORK))
                    .await;
                Ok(cached)
            }
            Freshness::Expired => {
                chain
                    .proceed(request.with_cache_control(RequestCacheControl::FORCE_NETWORK))
                    .await
            }
        }
    }
}

/// Builder for [`SwrPolicy`].
pub struct SwrPolicyBuilder {
    executor: Arc<dyn RequestExecutor>,
    clock: Arc<dyn Clock>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
    revalidation: RevalidationMode,
    log_revalidation_failures: bool,
}

impl SwrPolicyBuilder {
    fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        Self {
            executor,
            clock: Arc::new(SystemClock),
            diagnostics: None,
            revalidation: RevalidationMode::default(),
            log_revalidation_failures: DEFAULT_LOG_REVALIDATION_FAILURES,
        }
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    pub fn revalidation(mut self, mode: RevalidationMode) -> Self {
        self.revalidation = mode;
        self
    }

    pub fn log_revalidation_failures(mut self, enabled: bool) -> Self {
        self.log_revalidation_failures = enabled;
        self
    }

    /// Apply the policy settings from a loaded configuration.
    pub fn config(self, config: &SwrConfig) -> Self {
        self.revalidation(config.revalidation)
            .log_revalidation_failures(config.log_revalidation_failures)
    }

    pub fn build(self) -> SwrPolicy {
        let revalidator = Revalidator::new(
            Arc::clone(&self.executor),
            self.revalidation,
            self.log_revalidation_failures,
        );
        SwrPolicy {
            executor: self.executor,
            clock: self.clock,
            diagnostics: self.diagnostics,
            revalidator,
        }
    }
}
