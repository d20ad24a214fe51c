//! Batch APR computation across many users.
//!
//! One task per user on a [`JoinSet`], bounded by a semaphore. Completions
//! are consumed one at a time by the caller, so the result map has a single
//! writer.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::ScoreClient;
use crate::config::FailurePolicy;
use crate::error::{AprError, AprResult};
use crate::types::{BatchReport, ResultMap, UserId};

type MemberOutcome = (UserId, AprResult<f64>);

/// Runs fetch + aggregate for a set of users concurrently.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    client: ScoreClient,
    max_concurrency: usize,
    policy: FailurePolicy,
}

impl BatchRunner {
    /// Concurrency bound and failure policy are taken from the client config.
    pub fn new(client: ScoreClient) -> Self {
        let max_concurrency = client.config().max_concurrency.max(1);
        let policy = client.config().failure_policy;
        Self {
            client,
            max_concurrency,
            policy,
        }
    }

    pub fn with_max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = n.max(1);
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Run under the configured policy.
    ///
    /// With [`FailurePolicy::FailFast`] the report never has invalid ids: any
    /// failure is returned as the error instead.
    pub async fn run(&self, ids: &[UserId], cancel: &CancellationToken) -> AprResult<BatchReport> {
        match self.policy {
            FailurePolicy::FailFast => {
                let aprs = self.run_all_with_cancel(ids, cancel).await?;
                Ok(BatchReport {
                    aprs,
                    ..BatchReport::default()
                })
            }
            FailurePolicy::Isolate => self.run_all_isolated(ids, cancel).await,
        }
    }

    /// APR for every id, or the first error.
    ///
    /// The first failing member cancels and aborts the rest; no partial map
    /// is returned.
    pub async fn run_all(&self, ids: &[UserId]) -> AprResult<ResultMap> {
        self.run_all_with_cancel(ids, &CancellationToken::new()).await
    }

    /// Same as [`run_all`](Self::run_all), stopping early when `parent` is cancelled.
    pub async fn run_all_with_cancel(
        &self,
        ids: &[UserId],
        parent: &CancellationToken,
    ) -> AprResult<ResultMap> {
        let cancel = parent.child_token();
        let mut join_set = self.spawn_members(ids, &cancel);
        let total = join_set.len();
        let mut aprs = ResultMap::new();

        while let Some(joined) = join_set.join_next().await {
            let failure = match joined {
                Ok((user_id, Ok(apr))) => {
                    aprs.insert(user_id, apr);
                    continue;
                }
                Ok((user_id, Err(e))) => {
                    warn!(user_id = %user_id, error = %e, "apr failed, cancelling batch");
                    e
                }
                Err(e) => {
                    warn!(error = %e, "batch task failed, cancelling batch");
                    AprError::Task {
                        message: e.to_string(),
                    }
                }
            };

            cancel.cancel();
            join_set.abort_all();
            return Err(failure);
        }

        info!(users = total, "batch complete");
        Ok(aprs)
    }

    /// APR for every id that succeeds; failures are collected per id.
    ///
    /// Cancelling `parent` fails the run with [`AprError::Cancelled`]; a
    /// cancelled member is not an invalid id. A panicked member task also
    /// fails the whole run, since it cannot be attributed to an id.
    pub async fn run_all_isolated(
        &self,
        ids: &[UserId],
        parent: &CancellationToken,
    ) -> AprResult<BatchReport> {
        let cancel = parent.child_token();
        let mut join_set = self.spawn_members(ids, &cancel);
        let mut report = BatchReport::default();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((user_id, Ok(apr))) => {
                    report.aprs.insert(user_id, apr);
                }
                Ok((_, Err(AprError::Cancelled))) => {
                    warn!("batch cancelled");
                    join_set.abort_all();
                    return Err(AprError::Cancelled);
                }
                Ok((user_id, Err(e))) => {
                    warn!(user_id = %user_id, error = %e, "apr failed, recording invalid id");
                    report.invalid_ids.insert(user_id, e);
                }
                Err(e) => {
                    cancel.cancel();
                    join_set.abort_all();
                    return Err(AprError::Task {
                        message: e.to_string(),
                    });
                }
            }
        }

        if cancel.is_cancelled() {
            return Err(AprError::Cancelled);
        }

        info!(
            succeeded = report.aprs.len(),
            failed = report.invalid_ids.len(),
            "batch complete"
        );
        Ok(report)
    }

    fn spawn_members(
        &self,
        ids: &[UserId],
        cancel: &CancellationToken,
    ) -> JoinSet<MemberOutcome> {
        let unique: BTreeSet<UserId> = ids.iter().copied().collect();
        let sem = Arc::new(Semaphore::new(
            self.max_concurrency.min(Semaphore::MAX_PERMITS),
        ));
        let mut join_set = JoinSet::new();

        debug!(
            users = unique.len(),
            max_concurrency = self.max_concurrency,
            "spawning batch"
        );

        for user_id in unique {
            let client = self.client.clone();
            let sem = sem.clone();
            let cancel = cancel.clone();
            join_set.spawn(async move {
                let _permit = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return (user_id, Err(AprError::Cancelled)),
                    permit = sem.acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(_) => return (user_id, Err(AprError::Cancelled)),
                    },
                };
                (user_id, client.apr_for_user(user_id, &cancel).await)
            });
        }

        join_set
    }
}
