// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{
    DEFAULT_CLIENT_TIMEOUT_SECS, DEFAULT_LOG_LEVEL, DEFAULT_LOG_REVALIDATION_FAILURES,
    DEFAULT_USER_AGENT,
};
use crate::error::SwrError;
use crate::swr::RevalidationMode;

/// Top-level configuration (YAML format)
///
/// ```yaml
/// revalidation: background
/// log_revalidation_failures: true
/// logging:
///   level: debug
///   format: text
/// client:
///   timeout_secs: 10
///   user_agent: "feed-reader/1.0"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SwrConfig {
    /// How stale-while-revalidate refreshes are dispatched
    #[serde(default)]
    pub revalidation: RevalidationMode,

    /// Log failed revalidations instead of discarding them silently
    #[serde(default = "default_log_revalidation_failures")]
    pub log_revalidation_failures: bool,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

fn default_log_revalidation_failures() -> bool {
    DEFAULT_LOG_REVALIDATION_FAILURES
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event
    #[default]
    Json,
    /// Human-readable lines
    Text,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set (e.g. "info", "swr_interceptor=debug")
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Transport adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Overall request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_CLIENT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl SwrConfig {
    /// Parse YAML, replacing `${VAR_NAME}` with environment variable values.
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, SwrError> {
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| SwrError::Config(e.to_string()))?;

        // Check that all referenced environment variables exist first
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            std::env::var(var_name).map_err(|_| {
                SwrError::Config(format!(
                    "Environment variable '{}' is referenced but not set",
                    var_name
                ))
            })?;
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        serde_yaml::from_str(&substituted).map_err(|e| SwrError::Config(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SwrError> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| SwrError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), SwrError> {
        if self.client.timeout_secs == 0 {
            return Err(SwrError::Config(
                "client.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(SwrError::Config("logging.level cannot be empty".to_string()));
        }

        Ok(())
    }
}
