//! Credit score client and APR aggregation.
//!
//! This crate provides:
//!
//! - HTTP client that fetches a user's equifax and experian scores concurrently
//! - APR aggregation over the decoded scores
//! - Batch runner that computes APRs for many users with bounded concurrency
//!
//! # Quick Start
//!
//! ```no_run
//! use apr_core::{BatchRunner, ScoreClient, UserId};
//!
//! # async fn example() -> Result<(), apr_core::AprError> {
//! let client = ScoreClient::from_env()?;
//! let ids: Vec<UserId> = (1..=5).map(UserId).collect();
//!
//! let aprs = BatchRunner::new(client).run_all(&ids).await?;
//! for (id, apr) in &aprs {
//!     println!("{id}: {apr}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `APR_BASE_URL` | Score service base URL (default: `https://ember-sparkly-rule.glitch.me`) |
//! | `APR_TIMEOUT` | Request timeout in seconds (default: 30) |
//! | `APR_MAX_CONCURRENCY` | Users fetched at once in a batch (default: 8) |
//! | `APR_ISOLATE_FAILURES` | Collect per-user failures instead of failing the batch |

pub mod aggregate;
pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use aggregate::calculate_apr;
pub use batch::BatchRunner;
pub use client::{ScoreClient, SCORE_USER_AGENT};
pub use config::{FailurePolicy, ScoreConfig};
pub use error::{AprError, AprResult};
pub use types::{BatchReport, CreditScore, ResultMap, ScorePair, ScoreSource, UserId};

pub use tokio_util::sync::CancellationToken;
