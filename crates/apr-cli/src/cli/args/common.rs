//! Shared argument types used across multiple commands.

use apr_core::ScoreConfig;
use clap::ValueEnum;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Score service connection flags. Unset flags fall back to `APR_*` env vars.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct ClientArgs {
    /// Score service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

impl ClientArgs {
    pub fn config(&self) -> ScoreConfig {
        let mut config = ScoreConfig::from_env();
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout_secs(secs);
        }
        config
    }
}
