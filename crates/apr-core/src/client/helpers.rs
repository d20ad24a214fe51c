//! Pure helpers: request target construction and body decoding (no HTTP).

use url::Url;

use crate::error::{AprError, AprResult};
use crate::types::{CreditScore, ScoreSource, UserId};

/// Build `{base}/{source}/credit-score/{user_id}`.
///
/// Fails without touching the network when the base is not an absolute
/// http(s) URL or the id is zero.
pub(crate) fn score_url(base_url: &str, source: ScoreSource, user_id: UserId) -> AprResult<Url> {
    let target = format!(
        "{}/{}/credit-score/{}",
        base_url.trim_end_matches('/'),
        source.path_segment(),
        user_id
    );
    let bad_target = |reason: String| AprError::BadRequestTarget {
        target: target.clone(),
        reason,
    };

    if user_id.get() == 0 {
        return Err(bad_target("user id must be positive".to_string()));
    }

    let mut url = Url::parse(base_url).map_err(|e| bad_target(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(bad_target(format!("unsupported scheme: {}", url.scheme())));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(bad_target(
            "base URL must not carry a query or fragment".to_string(),
        ));
    }

    let id = user_id.to_string();
    url.path_segments_mut()
        .map_err(|_| bad_target("base URL cannot carry a path".to_string()))?
        .pop_if_empty()
        .extend([source.path_segment(), "credit-score", id.as_str()]);

    Ok(url)
}

/// Decode a score service body.
pub(crate) fn decode_score(source: ScoreSource, body: &str) -> AprResult<CreditScore> {
    serde_json::from_str(body).map_err(|e| AprError::Decode {
        side: source,
        message: e.to_string(),
    })
}
