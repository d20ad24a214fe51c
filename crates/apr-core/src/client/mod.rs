//! Score client: fetches both credit scores for a user concurrently.
//!
//! Status codes are interpreted only in http.rs.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::aggregate::calculate_apr;
use crate::config::ScoreConfig;
use crate::error::{AprError, AprResult};
use crate::types::{ScorePair, ScoreSource, UserId};

mod helpers;
mod http;

use helpers::{decode_score, score_url};
use http::HttpBackend;

/// User-Agent sent with every score request.
pub const SCORE_USER_AGENT: &str = concat!("apr-core/", env!("CARGO_PKG_VERSION"));

/// Client for the two score services.
#[derive(Debug, Clone)]
pub struct ScoreClient {
    http: HttpBackend,
    config: ScoreConfig,
}

impl ScoreClient {
    pub fn new(config: ScoreConfig) -> AprResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(SCORE_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .default_headers(default_headers)
            .build()
            .map_err(|e| AprError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http: HttpBackend { client },
            config,
        })
    }

    pub fn from_env() -> AprResult<Self> {
        Self::new(ScoreConfig::from_env())
    }

    /// Request target of one source for a user.
    pub fn score_url(&self, source: ScoreSource, user_id: UserId) -> AprResult<Url> {
        score_url(&self.config.base_url, source, user_id)
    }

    /// Fetch and decode both scores for `user_id`.
    ///
    /// Both targets are built before anything is sent, so a bad target never
    /// reaches the network. The two requests run concurrently; the fetch
    /// fails as a whole if either request or either decode fails.
    pub async fn fetch_scores(
        &self,
        user_id: UserId,
        cancel: &CancellationToken,
    ) -> AprResult<ScorePair> {
        let equifax_url = self.score_url(ScoreSource::Equifax, user_id)?;
        let experian_url = self.score_url(ScoreSource::Experian, user_id)?;

        if cancel.is_cancelled() {
            return Err(AprError::Cancelled);
        }

        debug!(
            user_id = %user_id,
            equifax = %equifax_url,
            experian = %experian_url,
            "fetching credit scores"
        );

        let (equifax_body, experian_body) = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AprError::Cancelled),
            bodies = async {
                tokio::try_join!(
                    self.http.get_score_body(ScoreSource::Equifax, &equifax_url),
                    self.http.get_score_body(ScoreSource::Experian, &experian_url),
                )
            } => bodies?,
        };

        if cancel.is_cancelled() {
            return Err(AprError::Cancelled);
        }

        let equifax = decode_score(ScoreSource::Equifax, &equifax_body);
        let experian = decode_score(ScoreSource::Experian, &experian_body);

        Ok(ScorePair {
            equifax: equifax?,
            experian: experian?,
        })
    }

    /// Fetch both scores and reduce them to an APR.
    pub async fn apr_for_user(&self, user_id: UserId, cancel: &CancellationToken) -> AprResult<f64> {
        let pair = self.fetch_scores(user_id, cancel).await?;
        let apr = calculate_apr(&pair.scores())?;
        debug!(user_id = %user_id, apr, "computed apr");
        Ok(apr)
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
