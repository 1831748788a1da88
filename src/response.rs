//! Response type returned by request executors.
//!
//! Besides the HTTP payload it carries the metadata a caching client
//! computes when it stores a response: when it was received and its
//! `max-age`.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

use crate::cache::{cache_control_header, extract_swr_seconds, CacheControl, SwrWindow};
use crate::constants::CACHE_MISS_STATUS;

/// A response, either fresh from the network or served from cache.
#[derive(Debug, Clone)]
pub struct SwrResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// Epoch seconds at which the response was originally received
    pub received_at: i64,
    /// `max-age` in seconds as parsed from the response, if declared
    pub max_age: Option<u64>,
}

impl SwrResponse {
    /// Build a response, deriving `max_age` from its Cache-Control header.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes, received_at: i64) -> Self {
        let max_age = CacheControl::parse(&cache_control_header(&headers)).max_age_seconds();
        Self {
            status,
            headers,
            body,
            received_at,
            max_age,
        }
    }

    /// Build from an `http::Response` received at `received_at`.
    pub fn from_http(response: http::Response<Bytes>, received_at: i64) -> Self {
        let (parts, body) = response.into_parts();
        Self::new(parts.status, parts.headers, body, received_at)
    }

    /// The answer a cache gives to an `only-if-cached` request it cannot serve.
    pub fn cache_miss(received_at: i64) -> Self {
        Self::new(CACHE_MISS_STATUS, HeaderMap::new(), Bytes::new(), received_at)
    }

    /// True if this is the cache-miss sentinel.
    pub fn is_cache_miss(&self) -> bool {
        self.status == CACHE_MISS_STATUS
    }

    /// Lower-cased Cache-Control header text (empty if absent)
    pub fn cache_control(&self) -> String {
        cache_control_header(&self.headers)
    }

    /// `stale-while-revalidate` seconds, 0 when absent or malformed
    pub fn swr_seconds(&self) -> u64 {
        extract_swr_seconds(&self.headers)
    }

    pub fn window(&self) -> SwrWindow {
        SwrWindow::for_response(self)
    }
}
