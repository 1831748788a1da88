// Cache module
//
// Reads the metadata a caching client attached to a response and turns it
// into an SWR window. Storage itself belongs to the client.

pub mod control;
pub mod window;

pub use control::{cache_control_header, extract_swr_seconds, parse_swr_seconds, CacheControl};
pub use window::{Freshness, SwrWindow};
