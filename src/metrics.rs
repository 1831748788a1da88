// SWR policy Prometheus metrics
//
// Provides counters for:
// - Decisions by outcome (bypass, miss, fresh, stale, expired)
// - Cache-only probe failures
// - Revalidation results

use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};
use std::sync::OnceLock;

use crate::cache::Freshness;

/// Global metrics for the SWR policy engine
pub struct SwrMetrics {
    /// Decisions taken, labelled by outcome
    pub decisions: IntCounterVec,

    /// Cache-only probes that failed with a transport error
    pub probe_errors: IntCounter,

    /// Revalidation requests, labelled by result (success, failure)
    pub revalidations: IntCounterVec,
}

/// Global singleton instance of metrics
static METRICS: OnceLock<SwrMetrics> = OnceLock::new();

impl SwrMetrics {
    /// Initialize and return the global metrics instance
    ///
    /// Registers with the default Prometheus registry on first use.
    pub fn global() -> &'static Self {
        METRICS.get_or_init(|| {
            let decisions = register_int_counter_vec!(
                "swr_decisions_total",
                "Total number of SWR policy decisions by outcome",
                &["outcome"] // bypass, miss, fresh, stale, expired
            )
            .expect("Failed to register swr_decisions_total metric");

            let probe_errors = register_int_counter!(
                "swr_probe_errors_total",
                "Total number of cache-only probes that failed with a transport error"
            )
            .expect("Failed to register swr_probe_errors_total metric");

            let revalidations = register_int_counter_vec!(
                "swr_revalidations_total",
                "Total number of stale-while-revalidate refresh requests by result",
                &["result"] // success, failure
            )
            .expect("Failed to register swr_revalidations_total metric");

            SwrMetrics {
                decisions,
                probe_errors,
                revalidations,
            }
        })
    }

    pub fn record_bypass(&self) {
        self.decisions.with_label_values(&["bypass"]).inc();
    }

    pub fn record_miss(&self) {
        self.decisions.with_label_values(&["miss"]).inc();
    }

    pub fn record_freshness(&self, freshness: Freshness) {
        self.decisions
            .with_label_values(&[freshness.as_str()])
            .inc();
    }

    pub fn record_probe_error(&self) {
        self.probe_errors.inc();
    }

    pub fn record_revalidation(&self, success: bool) {
        let result = if success { "success" } else { "failure" };
        self.revalidations.with_label_values(&[result]).inc();
    }
}
