// Logging module for structured logging using the tracing crate

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};
use crate::error::SwrError;

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize the global tracing subscriber
///
/// The subscriber is configured with:
/// - JSON or text formatting, per `config.format`
/// - Filtering from `RUST_LOG` when set, otherwise `config.level`
/// - Output to stdout
///
/// Calling this more than once, or after the host application installed its
/// own subscriber, is not an error; the first subscriber stays in place.
///
/// # Errors
///
/// Returns `SwrError::Config` if `config.level` is not a valid filter directive.
///
/// # Examples
///
/// ```
/// use swr_interceptor::config::LoggingConfig;
/// use swr_interceptor::logging::init_subscriber;
///
/// init_subscriber(&LoggingConfig::default()).expect("Failed to initialize logging");
/// tracing::info!("Application started");
/// ```
pub fn init_subscriber(config: &LoggingConfig) -> Result<(), SwrError> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }

    let filter = build_filter(config)?;

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Global subscriber already installed, keeping it");
    }

    let _ = INITIALIZED.set(());
    Ok(())
}

/// Build the event filter: `RUST_LOG` wins over the configured level.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, SwrError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            SwrError::Config(format!("Invalid log level '{}': {}", config.level, e))
        }),
    }
}
