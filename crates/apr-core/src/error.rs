//! Error types for score fetching and APR aggregation.

use crate::types::ScoreSource;

/// APR errors.
#[derive(Debug, thiserror::Error)]
pub enum AprError {
    /// A request target could not be built from the base URL and user id.
    #[error("bad request target {target}: {reason}")]
    BadRequestTarget { target: String, reason: String },

    /// A response body did not decode into a credit score.
    #[error("failed to decode {side} score: {message}")]
    Decode {
        side: ScoreSource,
        message: String,
    },

    /// Aggregation was invoked with zero scores.
    #[error("cannot aggregate an empty set of scores")]
    AggregateInputEmpty,

    /// Score service answered with a non-success status.
    #[error("{side} score service returned HTTP {status}")]
    UnexpectedStatus { side: ScoreSource, status: u16 },

    /// Network error.
    #[error("network error: {message}")]
    Network { message: String },

    /// The enclosing operation was cancelled.
    #[error("operation cancelled")]
    Cancelled,

    /// A batch member task panicked or was aborted.
    #[error("task failed: {message}")]
    Task { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl AprError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Bad input / config
            Self::BadRequestTarget { .. } => 1,
            Self::Config { .. } => 1,

            // Remote data
            Self::Decode { .. } => 3,
            Self::UnexpectedStatus { .. } => 4,
            Self::Network { .. } => 4,

            // Runtime
            Self::Cancelled => 5,
            Self::Task { .. } => 6,

            // Precondition (library only; 2 is clap's usage code)
            Self::AggregateInputEmpty => 9,
        }
    }
}

impl From<reqwest::Error> for AprError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for APR operations.
pub type AprResult<T> = Result<T, AprError>;
