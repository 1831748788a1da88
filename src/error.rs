// Error types module

/// Centralized error type for the SWR interceptor
///
/// Transport failures are kept apart from configuration problems so the
/// cache-only probe can recover from the former and let the rest through.
#[derive(Debug, thiserror::Error)]
pub enum SwrError {
    /// Network-level failure reported by the request executor
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O failure surfaced by the request executor
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration (bad YAML, missing env vars, out-of-range values)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SwrError {
    /// True for failures that happened while talking to the network.
    pub fn is_transport(&self) -> bool {
        matches!(self, SwrError::Transport(_) | SwrError::Io(_))
    }
}

impl From<reqwest::Error> for SwrError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SwrError::Transport(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            SwrError::Transport(format!("Connection failed: {}", err))
        } else {
            SwrError::Transport(format!("Request failed: {}", err))
        }
    }
}
