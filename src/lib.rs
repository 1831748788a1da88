// SWR Interceptor Library
// Stale-while-revalidate request policy for caching HTTP clients

pub mod cache;
pub mod client;
pub mod collaborators;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod request;
pub mod response;
pub mod swr;

pub use collaborators::{Chain, Clock, DiagnosticSink, ManualClock, RequestExecutor, SystemClock};
pub use error::SwrError;
pub use request::{RequestCacheControl, SwrRequest};
pub use response::SwrResponse;
pub use swr::{RevalidationMode, SwrPolicy};
