//! Score service types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AprError;

/// Opaque user identifier, formatted into the score service path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = AprError;

    /// Parse a decimal id. Signs and whitespace are rejected; zero parses
    /// and is refused later, when the request target is built.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AprError::BadRequestTarget {
                target: s.to_string(),
                reason: "user id must be a decimal integer".to_string(),
            });
        }
        let id: u64 = s.parse().map_err(|e| AprError::BadRequestTarget {
            target: s.to_string(),
            reason: format!("invalid user id: {}", e),
        })?;
        Ok(Self(id))
    }
}

/// One of the two score services queried per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    Equifax,
    Experian,
}

impl ScoreSource {
    /// First path segment of the source's endpoint.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Equifax => "equifax",
            Self::Experian => "experian",
        }
    }
}

impl fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Response body of a score service.
///
/// Only `score` is read; other fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditScore {
    pub score: u64,
}

impl CreditScore {
    pub fn new(score: u64) -> Self {
        Self { score }
    }
}

/// Both scores of a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScorePair {
    pub equifax: CreditScore,
    pub experian: CreditScore,
}

impl ScorePair {
    pub fn scores(&self) -> [CreditScore; 2] {
        [self.equifax, self.experian]
    }
}

/// APR per user, ordered by id.
pub type ResultMap = BTreeMap<UserId, f64>;

/// Outcome of a batch run that isolates per-id failures.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Rates for every id that succeeded.
    pub aprs: ResultMap,
    /// Ids that failed, with the error each one hit.
    pub invalid_ids: BTreeMap<UserId, AprError>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.invalid_ids.is_empty()
    }
}
