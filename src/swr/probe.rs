// Cache-only probe
//
// Asks the caching client for a stored response without letting it touch
// the network. The client answers 504 when it has nothing to serve.

use super::SwrPolicy;
use crate::error::SwrError;
use crate::metrics::SwrMetrics;
use crate::request::{RequestCacheControl, SwrRequest};
use crate::response::SwrResponse;

impl SwrPolicy {
    /// Look up `request` in the collaborator cache.
    ///
    /// Returns `Ok(None)` on the 504 miss sentinel and on transport failures,
    /// which are reported to the diagnostic sink; the caller then falls back
    /// to the network. Any other response, error statuses included, counts
    /// as cached. Non-transport errors propagate.
    pub async fn probe_cache(&self, request: &SwrRequest) -> Result<Option<SwrResponse>, SwrError> {
        let probe = request.with_cache_control(RequestCacheControl::ONLY_IF_CACHED);

        match self.executor.execute(probe).await {
            Ok(response) if response.is_cache_miss() => Ok(None),
            Ok(response) => Ok(Some(response)),
            Err(e) if e.is_transport() => {
                SwrMetrics::global().record_probe_error();
                tracing::warn!(uri = %request.uri, error = %e, "Cache-only probe failed, falling back to network");
                if let Some(sink) = &self.diagnostics {
                    sink.log(&format!("Cache probe failed: {}", e));
                }
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
