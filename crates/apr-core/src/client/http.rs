//! HTTP layer: the only place that looks at status codes.

use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::error::{AprError, AprResult};
use crate::types::ScoreSource;

/// HTTP backend for score requests.
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
}

impl HttpBackend {
    /// GET a score body; any 2xx yields the body text.
    pub(crate) async fn get_score_body(&self, source: ScoreSource, url: &Url) -> AprResult<String> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        debug!(source = %source, status = status.as_u16(), "score response");

        if !status.is_success() {
            return Err(unexpected_status(source, status));
        }

        response.text().await.map_err(|e| AprError::Network {
            message: format!("failed to read {} response body: {}", source, e),
        })
    }
}

fn unexpected_status(source: ScoreSource, status: StatusCode) -> AprError {
    AprError::UnexpectedStatus {
        side: source,
        status: status.as_u16(),
    }
}
