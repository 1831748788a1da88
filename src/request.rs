//! Outgoing request descriptor and its cache-control directives.
//!
//! The policy engine never mutates a caller's request. When it needs a
//! different cache-control (the cache-only probe, a forced network fetch)
//! it derives a copy with [`SwrRequest::with_cache_control`].

use bytes::Bytes;
use http::header::CACHE_CONTROL;
use http::{HeaderMap, HeaderValue, Method, Uri};

use crate::cache::cache_control_header;

/// Request-side Cache-Control directives.
///
/// The set mirrors what a caching client honors on a request:
/// - `no-cache`: skip the cache and go to the network
/// - `no-store`: do not store the response
/// - `only-if-cached`: never go to the network
/// - `max-age` / `max-stale`: freshness limits the caller accepts
///
/// The policy itself only branches on `no-cache` and `only-if-cached`
/// (see [`is_explicit`](Self::is_explicit)). The remaining directives are
/// carried through unchanged and rendered onto the wire for the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestCacheControl {
    pub no_cache: bool,
    pub no_store: bool,
    pub only_if_cached: bool,
    pub max_age: Option<u32>,
    pub max_stale: Option<u32>,
}

impl RequestCacheControl {
    /// Bypass the cache entirely and fetch from the network.
    pub const FORCE_NETWORK: Self = Self {
        no_cache: true,
        no_store: false,
        only_if_cached: false,
        max_age: None,
        max_stale: None,
    };

    /// Use the cache regardless of staleness, never the network.
    pub const FORCE_CACHE: Self = Self {
        no_cache: false,
        no_store: false,
        only_if_cached: true,
        max_age: None,
        max_stale: Some(u32::MAX),
    };

    /// Use the cache under its normal freshness rules, never the network.
    pub const ONLY_IF_CACHED: Self = Self {
        no_cache: false,
        no_store: false,
        only_if_cached: true,
        max_age: None,
        max_stale: None,
    };

    /// Parse a request Cache-Control header value.
    ///
    /// Directive names are matched case-insensitively; unknown directives and
    /// unparsable values are ignored.
    pub fn parse(header_value: &str) -> Self {
        let mut result = Self::default();

        for directive in header_value.split(',') {
            let directive = directive.trim().to_lowercase();
            if directive.is_empty() {
                continue;
            }

            match directive.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim().trim_matches('"').parse::<u32>().ok();
                    match name.trim() {
                        "max-age" => result.max_age = value,
                        "max-stale" => result.max_stale = value,
                        _ => {}
                    }
                }
                None => match directive.as_str() {
                    "no-cache" => result.no_cache = true,
                    "no-store" => result.no_store = true,
                    "only-if-cached" => result.only_if_cached = true,
                    // A bare max-stale accepts any staleness
                    "max-stale" => result.max_stale = Some(u32::MAX),
                    _ => {}
                },
            }
        }

        result
    }

    /// Combine two directive sets; flags are OR-ed and `self` wins on values.
    pub fn union(self, other: Self) -> Self {
        Self {
            no_cache: self.no_cache || other.no_cache,
            no_store: self.no_store || other.no_store,
            only_if_cached: self.only_if_cached || other.only_if_cached,
            max_age: self.max_age.or(other.max_age),
            max_stale: self.max_stale.or(other.max_stale),
        }
    }

    /// True when the caller has already made an explicit freshness decision.
    pub fn is_explicit(&self) -> bool {
        self.no_cache || self.only_if_cached
    }

    /// Render the directives as a header value, or `None` if there are none.
    pub fn header_value(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.no_cache {
            parts.push("no-cache".to_string());
        }
        if self.no_store {
            parts.push("no-store".to_string());
        }
        if let Some(max_age) = self.max_age {
            parts.push(format!("max-age={}", max_age));
        }
        if let Some(max_stale) = self.max_stale {
            parts.push(format!("max-stale={}", max_stale));
        }
        if self.only_if_cached {
            parts.push("only-if-cached".to_string());
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// An outgoing HTTP request as seen by the policy engine.
#[derive(Debug, Clone)]
pub struct SwrRequest {
    pub method: Method,
    pub uri: Uri,
    /// Headers other than Cache-Control, which lives in `cache_control`
    pub headers: HeaderMap,
    pub body: Bytes,
    pub cache_control: RequestCacheControl,
}

impl SwrRequest {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            cache_control: RequestCacheControl::default(),
        }
    }

    /// Shorthand for a GET request without directives.
    pub fn get(uri: Uri) -> Self {
        Self::new(Method::GET, uri)
    }

    /// Build from an `http::Request`, lifting its Cache-Control header into
    /// structured directives.
    pub fn from_http(request: http::Request<Bytes>) -> Self {
        let (parts, body) = request.into_parts();
        let mut headers = parts.headers;
        let cache_control = RequestCacheControl::parse(&cache_control_header(&headers));
        headers.remove(CACHE_CONTROL);

        Self {
            method: parts.method,
            uri: parts.uri,
            headers,
            body,
            cache_control,
        }
    }

    /// Derive a copy of this request with its cache-control replaced.
    pub fn with_cache_control(&self, cache_control: RequestCacheControl) -> Self {
        Self {
            cache_control,
            ..self.clone()
        }
    }

    /// Builder-style header setter.
    ///
    /// A Cache-Control header replaces `cache_control` instead of being
    /// stored raw, so the policy sees the caller's directives.
    pub fn header(mut self, name: http::header::HeaderName, value: HeaderValue) -> Self {
        if name == CACHE_CONTROL {
            self.cache_control =
                RequestCacheControl::parse(&String::from_utf8_lossy(value.as_bytes()));
        } else {
            self.headers.insert(name, value);
        }
        self
    }

    /// Directives in force for this request.
    ///
    /// `headers` is public, so a raw Cache-Control may still sit there; its
    /// directives are merged with the structured ones.
    pub fn effective_cache_control(&self) -> RequestCacheControl {
        if self.headers.contains_key(CACHE_CONTROL) {
            self.cache_control
                .union(RequestCacheControl::parse(&cache_control_header(&self.headers)))
        } else {
            self.cache_control
        }
    }

    /// Headers to send on the wire, including the rendered Cache-Control.
    pub fn wire_headers(&self) -> HeaderMap {
        let mut headers = self.headers.clone();
        if let Some(value) = self.cache_control.header_value() {
            if let Ok(value) = HeaderValue::from_str(&value) {
                headers.insert(CACHE_CONTROL, value);
            }
        }
        headers
    }
}
