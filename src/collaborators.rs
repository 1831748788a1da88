//! Collaborator traits the policy engine is built from.
//!
//! The engine never talks to the network, the system clock or a log sink
//! directly. Each is injected at construction so production adapters and
//! deterministic test doubles are interchangeable.

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::SwrError;
use crate::request::SwrRequest;
use crate::response::SwrResponse;

/// Executes a request through the caching client.
///
/// Implementations own retry/backoff; the engine never inspects it.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, request: SwrRequest) -> Result<SwrResponse, SwrError>;
}

/// Source of the current time, in whole seconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

impl<F> Clock for F
where
    F: Fn() -> i64 + Send + Sync,
{
    fn now(&self) -> i64 {
        self()
    }
}

/// Wall clock backed by `SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Optional diagnostic output. Never affects control flow.
pub trait DiagnosticSink: Send + Sync {
    fn log(&self, message: &str);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        self(message)
    }
}

/// Forwards diagnostics to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, message: &str) {
        tracing::warn!(target: "swr_interceptor::diagnostics", "{}", message);
    }
}

/// One link of an interception chain.
///
/// `request()` is the request as it reached this link; `proceed` hands a
/// request to the rest of the chain (eventually the caching client).
#[async_trait]
pub trait Chain: Send + Sync {
    fn request(&self) -> &SwrRequest;

    async fn proceed(&self, request: SwrRequest) -> Result<SwrResponse, SwrError>;
}

/// Chain whose remainder is a single executor.
pub struct ExecutorChain<'a> {
    request: SwrRequest,
    executor: &'a dyn RequestExecutor,
}

impl<'a> ExecutorChain<'a> {
    pub fn new(request: SwrRequest, executor: &'a dyn RequestExecutor) -> Self {
        Self { request, executor }
    }
}

#[async_trait]
impl<'a> Chain for ExecutorChain<'a> {
    fn request(&self) -> &SwrRequest {
        &self.request
    }

    async fn proceed(&self, request: SwrRequest) -> Result<SwrResponse, SwrError> {
        self.executor.execute(request).await
    }
}
