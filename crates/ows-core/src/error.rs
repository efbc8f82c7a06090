//! Error taxonomy shared by every resolver.

use thiserror::Error;

/// Failures raised at the point of a malformed call. Never retried internally.
#[derive(Debug, Error)]
pub enum RulesError {
    /// An unknown die rank was requested (by name or side count).
    #[error("invalid die rank: {0}")]
    InvalidRank(String),

    /// Cooperative detection was called with an empty sensor list.
    #[error("cooperative detection requires at least one sensor")]
    NoSensors,

    /// Strike package validation found aircraft with nothing to strike with.
    #[error("no munitions loaded and no organic strike: {}", .offenders.join(", "))]
    UnarmedAircraft { offenders: Vec<String> },

    /// Generic input-shape violation (negative-like counts, over-capacity loads, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("config parse error: {0}")]
    Config(#[source] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RulesError>;

const INVALID_RANK_PREFIX: &str = "invalid die rank: ";

/// A rank rejected while deserializing comes back as `InvalidRank`, not as a
/// generic parse error. serde_json keeps only the message, so the rank is
/// recovered from it.
impl From<serde_json::Error> for RulesError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            let message = err.to_string();
            if let Some(rest) = message.split(INVALID_RANK_PREFIX).nth(1) {
                let rank = rest.split(" at line ").next().unwrap_or(rest);
                return RulesError::InvalidRank(rank.to_string());
            }
        }
        RulesError::Config(err)
    }
}
