// Interception chain tests
//
// When the policy runs inside a chain, pass-through and expired requests
// continue down the chain while probes and refreshes go to the executor.

use super::support::{cached_response, request, NetworkAnswer, ProbeAnswer, ScriptedExecutor};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use std::sync::{Arc, Mutex};
use swr_interceptor::{
    Chain, ManualClock, RequestCacheControl, SwrError, SwrPolicy, SwrRequest, SwrResponse,
};

struct RecordingChain {
    request: SwrRequest,
    proceeded: Mutex<Vec<SwrRequest>>,
}

impl RecordingChain {
    fn new(request: SwrRequest) -> Self {
        Self {
            request,
            proceeded: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Chain for RecordingChain {
    fn request(&self) -> &SwrRequest {
        &self.request
    }

    async fn proceed(&self, request: SwrRequest) -> Result<SwrResponse, SwrError> {
        self.proceeded.lock().unwrap().push(request);
        Ok(SwrResponse::new(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from("from chain"),
            3000,
        ))
    }
}

fn policy(executor: Arc<ScriptedExecutor>, now: i64) -> SwrPolicy {
    SwrPolicy::builder(executor)
        .clock(Arc::new(ManualClock::new(now)))
        .build()
}

#[tokio::test]
async fn test_expired_proceeds_down_the_chain() {
    let executor = Arc::new(ScriptedExecutor::new(
        ProbeAnswer::Cached(cached_response()),
        NetworkAnswer::Body("network"),
    ));
    let chain = RecordingChain::new(request());

    let result = policy(executor.clone(), 1061).intercept(&chain).await.unwrap();

    assert_eq!(result.body, Bytes::from("from chain"));
    let proceeded = chain.proceeded.lock().unwrap();
    assert_eq!(proceeded.len(), 1);
    assert_eq!(proceeded[0].cache_control, RequestCacheControl::FORCE_NETWORK);
    // Only the probe hit the executor
    assert_eq!(executor.calls().len(), 1);
}

#[tokio::test]
async fn test_stale_refresh_goes_to_executor_not_chain() {
    let executor = Arc::new(ScriptedExecutor::new(
        ProbeAnswer::Cached(cached_response()),
        NetworkAnswer::Body("network"),
    ));
    let chain = RecordingChain::new(request());

    let result = policy(executor.clone(), 1020).intercept(&chain).await.unwrap();

    assert_eq!(result.body, Bytes::from("cached"));
    assert!(chain.proceeded.lock().unwrap().is_empty());
    assert_eq!(executor.forced_network_count(), 1);
}

#[tokio::test]
async fn test_bypass_and_miss_proceed_with_original_request() {
    let executor = Arc::new(ScriptedExecutor::new(
        ProbeAnswer::Miss,
        NetworkAnswer::Body("network"),
    ));

    let miss_chain = RecordingChain::new(request());
    policy(executor.clone(), 1010)
        .intercept(&miss_chain)
        .await
        .unwrap();
    assert_eq!(
        miss_chain.proceeded.lock().unwrap()[0].cache_control,
        RequestCacheControl::default()
    );

    let bypass_chain =
        RecordingChain::new(request().with_cache_control(RequestCacheControl::FORCE_NETWORK));
    policy(executor.clone(), 1010)
        .intercept(&bypass_chain)
        .await
        .unwrap();
    assert_eq!(
        bypass_chain.proceeded.lock().unwrap()[0].cache_control,
        RequestCacheControl::FORCE_NETWORK
    );

    // One probe for the miss, none for the bypass
    assert_eq!(executor.probe_count(), 1);
}
