//! SWR window computation and freshness classification.
//!
//! A cached response is:
//! - **fresh** before `fresh_until = received_at + max_age`
//! - **stale but servable** from `fresh_until` through `stale_until` (both inclusive)
//! - **expired** after `stale_until = fresh_until + swr_seconds`

use crate::response::SwrResponse;

/// Where a cached response sits relative to its SWR window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Freshness {
    /// Within max-age; serve without network activity
    Fresh,
    /// Past max-age but inside the SWR window; serve and revalidate
    StaleWhileRevalidate,
    /// Past the SWR window; must be fetched again
    Expired,
}

impl Freshness {
    /// Stable label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::Fresh => "fresh",
            Freshness::StaleWhileRevalidate => "stale",
            Freshness::Expired => "expired",
        }
    }
}

impl std::fmt::Display for Freshness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request SWR window, in epoch seconds.
///
/// Invariant: `fresh_until <= stale_until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwrWindow {
    pub fresh_until: i64,
    pub stale_until: i64,
}

impl SwrWindow {
    /// Build a window from raw values.
    ///
    /// Negative `max_age` and `swr_seconds` clamp to 0; sums saturate.
    pub fn new(received_at: i64, max_age: i64, swr_seconds: i64) -> Self {
        let fresh_until = received_at.saturating_add(max_age.max(0));
        let stale_until = fresh_until.saturating_add(swr_seconds.max(0));
        Self {
            fresh_until,
            stale_until,
        }
    }

    /// Window for a cached response, from the metadata the collaborator
    /// computed plus the `stale-while-revalidate` extension.
    pub fn for_response(response: &SwrResponse) -> Self {
        let max_age = response
            .max_age
            .map(|secs| i64::try_from(secs).unwrap_or(i64::MAX))
            .unwrap_or(0);
        let swr_seconds = i64::try_from(response.swr_seconds()).unwrap_or(i64::MAX);
        Self::new(response.received_at, max_age, swr_seconds)
    }

    /// Classify `now` against this window.
    pub fn classify(&self, now: i64) -> Freshness {
        if now < self.fresh_until {
            Freshness::Fresh
        } else if now <= self.stale_until {
            Freshness::StaleWhileRevalidate
        } else {
            Freshness::Expired
        }
    }
}
