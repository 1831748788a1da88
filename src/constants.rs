// Constants module - centralized default values for configuration
//
// Defaults used by the config layer, the transport adapter and the
// policy engine live here instead of being scattered as magic numbers.

use http::StatusCode;

// =============================================================================
// Policy defaults
// =============================================================================

/// Status the collaborator cache answers with when an `only-if-cached`
/// request cannot be satisfied from cache.
pub const CACHE_MISS_STATUS: StatusCode = StatusCode::GATEWAY_TIMEOUT;

/// SWR window (in seconds) assumed when a response carries no usable
/// `stale-while-revalidate` directive
pub const DEFAULT_SWR_SECONDS: u64 = 0;

/// Whether failed background revalidations are logged by default
pub const DEFAULT_LOG_REVALIDATION_FAILURES: bool = false;

// =============================================================================
// Client defaults
// =============================================================================

/// Default transport request timeout in seconds
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent sent by the transport adapter
pub const DEFAULT_USER_AGENT: &str = concat!("swr-interceptor/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log level directive when `RUST_LOG` is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";
