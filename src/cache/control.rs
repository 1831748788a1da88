//! Cache-Control header parsing for cached responses.
//!
//! Two readers live here:
//! - [`CacheControl::parse`] reads `max-age` the way a caching client does
//!   when it computes a response's freshness lifetime.
//! - [`parse_swr_seconds`] extracts the `stale-while-revalidate` extension
//!   with a lenient pattern match, since many clients do not understand it.
//!
//! # Example
//!
//! ```rust
//! use swr_interceptor::cache::{parse_swr_seconds, CacheControl};
//!
//! let cc = CacheControl::parse("max-age=20, stale-while-revalidate=40");
//! assert_eq!(cc.max_age, Some(std::time::Duration::from_secs(20)));
//! assert_eq!(parse_swr_seconds("max-age=20, stale-while-revalidate=40"), 40);
//! ```

use http::header::CACHE_CONTROL;
use http::HeaderMap;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

use crate::constants::DEFAULT_SWR_SECONDS;

/// Response Cache-Control as a caching client reads it for freshness.
///
/// Only `max-age` is kept; the SWR extension is read by
/// [`parse_swr_seconds`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheControl {
    /// Freshness lifetime (max-age directive)
    pub max_age: Option<Duration>,
}

impl CacheControl {
    /// Parse a Cache-Control header value.
    ///
    /// Directives are comma-separated and matched case-insensitively. A
    /// later valid `max-age` replaces an earlier one; unparsable values are
    /// ignored.
    pub fn parse(header_value: &str) -> Self {
        let mut result = Self::default();

        for directive in header_value.split(',') {
            let directive = directive.trim().to_lowercase();
            let Some((name, value)) = directive.split_once('=') else {
                continue;
            };

            if name.trim() == "max-age" {
                let seconds = value
                    .trim()
                    .trim_matches('"')
                    .parse::<u64>()
                    .ok()
                    .map(Duration::from_secs);
                result.max_age = seconds.or(result.max_age);
            }
        }

        result
    }

    /// Freshness lifetime in whole seconds, if the response declared one.
    pub fn max_age_seconds(&self) -> Option<u64> {
        self.max_age.map(|max_age| max_age.as_secs())
    }
}

static SWR_DIRECTIVE: OnceLock<Regex> = OnceLock::new();

fn swr_directive() -> &'static Regex {
    SWR_DIRECTIVE.get_or_init(|| {
        Regex::new(r"stale-while-revalidate\s*=\s*(\d*)").expect("SWR directive pattern is valid")
    })
}

/// Join every Cache-Control header line and lower-case the result.
///
/// `HeaderMap` lookups are case-insensitive, so `cache-control`,
/// `Cache-Control` and `Cache-control` all land here.
///
/// Values carrying non-ASCII bytes are decoded lossily rather than dropped,
/// so the directives around them still count.
pub fn cache_control_header(headers: &HeaderMap) -> String {
    headers
        .get_all(CACHE_CONTROL)
        .iter()
        .map(|value| match value.to_str() {
            Ok(text) => text.to_string(),
            Err(_) => {
                tracing::debug!(
                    raw = ?value,
                    "Cache-Control value is not visible ASCII, decoding lossily"
                );
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
        .to_lowercase()
}

/// Extract the `stale-while-revalidate` seconds from a Cache-Control value.
///
/// Returns 0 when the directive is absent, has no digits, or does not fit in
/// a `u64`. When the directive repeats, the last occurrence wins.
pub fn parse_swr_seconds(header_value: &str) -> u64 {
    let lowered = header_value.to_lowercase();
    swr_directive()
        .captures_iter(&lowered)
        .last()
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse::<u64>().ok())
        .unwrap_or(DEFAULT_SWR_SECONDS)
}

/// Extract the `stale-while-revalidate` seconds from response headers.
pub fn extract_swr_seconds(headers: &HeaderMap) -> u64 {
    parse_swr_seconds(&cache_control_header(headers))
}
