//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the policy file.
//! Every section defaults to the built-in policy, so an empty file is valid.

use serde::{Deserialize, Serialize};

use crate::filter::denylist::DEFAULT_PATTERNS;
use crate::filter::engine::DEFAULT_BLOCKED_DESTINATION;

/// Root configuration for the request filter.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    /// Denylist and fetch-destination rules.
    pub policy: PolicyConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Policy file hot reload.
    pub reload: ReloadConfig,
}

/// Filtering policy.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PolicyConfig {
    /// Lowercase hostname substrings, scanned in order.
    pub denylist: Vec<String>,

    /// `Sec-Fetch-Dest` values that are always blocked.
    pub blocked_destinations: Vec<String>,

    /// Optional metadata about the policy source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<PolicyInfo>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            denylist: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            blocked_destinations: vec![DEFAULT_BLOCKED_DESTINATION.to_string()],
            info: None,
        }
    }
}

/// Descriptive metadata, logged when the policy is loaded.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct PolicyInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Output format of the log layer.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive (e.g. "info", "request_filter=debug").
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Reload configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ReloadConfig {
    /// Watch the policy file and swap in changes.
    pub enabled: bool,

    /// Poll interval for watcher backends that poll, in seconds.
    pub poll_interval_secs: u64,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            poll_interval_secs: 2,
        }
    }
}
