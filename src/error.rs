//! Configuration errors
//!
//! The simulation itself never fails; only a bad config can stop a session
//! from being built.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("house layout has no hiding spots")]
    NoHidingSpots,
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
