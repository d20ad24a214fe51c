//! Client and batch configuration.

use serde::{Deserialize, Serialize};

/// How a batch reacts when one of its members fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// First failure cancels the remaining members and fails the batch.
    #[default]
    FailFast,
    /// Every member runs; failures are collected per id.
    Isolate,
}

/// Score client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Base URL of the score services.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum number of users fetched at once in a batch.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Batch failure handling.
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

fn default_base_url() -> String {
    "https://ember-sparkly-rule.glitch.me".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_concurrency() -> usize {
    8
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_concurrency: default_max_concurrency(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl ScoreConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `APR_BASE_URL` | Score service base URL |
    /// | `APR_TIMEOUT` | Request timeout in seconds |
    /// | `APR_MAX_CONCURRENCY` | Batch concurrency bound |
    /// | `APR_ISOLATE_FAILURES` | Collect per-id failures instead of failing the batch |
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("APR_BASE_URL").unwrap_or_else(|_| default_base_url()),
            timeout_secs: std::env::var("APR_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .unwrap_or_else(default_timeout),
            max_concurrency: std::env::var("APR_MAX_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or_else(default_max_concurrency),
            failure_policy: match std::env::var("APR_ISOLATE_FAILURES") {
                Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => FailurePolicy::Isolate,
                _ => FailurePolicy::FailFast,
            },
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout (at least 1 second).
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }

    /// Set the batch concurrency bound (at least 1).
    pub fn with_max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = n.max(1);
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}
