// End-to-end SWR flow against a local HTTP origin
//
// ReqwestExecutor is the transport; MemoryCachingExecutor stands in for the
// caching client. A shared ManualClock drives both the policy and the
// received-at stamps.

use super::test_harness::{closed_port, MemoryCachingExecutor, TestOrigin};
use bytes::Bytes;
use std::sync::Arc;
use swr_interceptor::client::ReqwestExecutor;
use swr_interceptor::config::ClientConfig;
use swr_interceptor::{ManualClock, RequestCacheControl, SwrError, SwrPolicy, SwrRequest};

fn get(url: &str) -> SwrRequest {
    SwrRequest::get(url.parse().expect("valid test url"))
}

#[tokio::test]
async fn test_full_swr_lifecycle() {
    let origin = TestOrigin::start("max-age=20, stale-while-revalidate=40", "hello").await;
    let clock = Arc::new(ManualClock::new(1000));
    let transport = ReqwestExecutor::with_clock(&ClientConfig::default(), clock.clone()).unwrap();
    let policy = SwrPolicy::builder(Arc::new(MemoryCachingExecutor::new(transport)))
        .clock(clock.clone())
        .build();
    let url = origin.url("/feed");

    // Cold cache: the original request goes to the origin and gets stored
    let response = policy.decide(get(&url)).await.unwrap();
    assert_eq!(response.body, Bytes::from("hello"));
    assert_eq!(response.received_at, 1000);
    assert_eq!(origin.requests().len(), 1);
    assert!(!origin.requests()[0].contains("cache-control"));

    // Fresh: served from cache, origin untouched
    clock.set(1010);
    policy.decide(get(&url)).await.unwrap();
    assert_eq!(origin.requests().len(), 1);

    // Stale but servable: cached copy returned, one forced refresh sent
    clock.set(1030);
    let response = policy.decide(get(&url)).await.unwrap();
    assert_eq!(response.received_at, 1000);
    assert_eq!(origin.requests().len(), 2);
    assert!(origin.requests()[1].contains("cache-control: no-cache"));

    // The refresh re-stamped the cache at 1030, so 1080 is still servable stale
    clock.set(1080);
    let response = policy.decide(get(&url)).await.unwrap();
    assert_eq!(response.received_at, 1030);
    assert_eq!(origin.requests().len(), 3);

    // Past 1080 + 20 + 40: expired, forced network fetch returned
    clock.set(1141);
    let response = policy.decide(get(&url)).await.unwrap();
    assert_eq!(response.received_at, 1141);
    assert_eq!(origin.requests().len(), 4);
    assert!(origin.requests()[3].contains("cache-control: no-cache"));
}

#[tokio::test]
async fn test_bare_transport_behaves_as_pass_through() {
    let origin = TestOrigin::start("max-age=20, stale-while-revalidate=40", "plain").await;
    let transport = ReqwestExecutor::new(&ClientConfig::default()).unwrap();
    let policy = SwrPolicy::new(Arc::new(transport));

    let response = policy.decide(get(&origin.url("/plain"))).await.unwrap();

    // The probe is answered locally with 504, so only the original request goes out
    assert_eq!(response.status, http::StatusCode::OK);
    assert_eq!(response.max_age, Some(20));
    assert_eq!(response.swr_seconds(), 40);
    assert_eq!(origin.requests().len(), 1);
}

#[tokio::test]
async fn test_forced_network_sends_no_cache_header() {
    let origin = TestOrigin::start("max-age=20", "forced").await;
    let transport = ReqwestExecutor::new(&ClientConfig::default()).unwrap();
    let policy = SwrPolicy::new(Arc::new(transport));

    let request = get(&origin.url("/forced")).with_cache_control(RequestCacheControl::FORCE_NETWORK);
    policy.decide(request).await.unwrap();

    let requests = origin.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].contains("cache-control: no-cache"));
}

#[tokio::test]
async fn test_unreachable_origin_propagates_transport_error() {
    let port = closed_port().await;
    let transport = ReqwestExecutor::new(&ClientConfig::default()).unwrap();
    let policy = SwrPolicy::new(Arc::new(transport));

    let result = policy
        .decide(get(&format!("http://127.0.0.1:{}/down", port)))
        .await;

    assert!(matches!(result, Err(SwrError::Transport(_))));
}
