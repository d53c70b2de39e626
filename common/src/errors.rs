use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a failed one-shot position fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location unavailable")]
    Unavailable,
    #[error("location request timed out")]
    Timeout,
    #[error("unknown location error")]
    Unknown,
}

/// User-facing bucket a provider failure falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    Connectivity,
    ServiceUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ProviderError {
    #[error("request denied by the place provider")]
    RequestDenied,
    #[error("place provider quota exceeded")]
    QuotaExceeded,
    #[error("no results")]
    ZeroResults,
    #[error("transport failure: {message}")]
    Transport { offline: bool, message: String },
}

impl ProviderError {
    pub fn is_zero_results(&self) -> bool {
        matches!(self, ProviderError::ZeroResults)
    }

    /// Failures that leave the user without data and are surfaced as state.
    pub fn is_fatal(&self) -> bool {
        match self {
            ProviderError::RequestDenied => true,
            ProviderError::Transport { offline, .. } => *offline,
            ProviderError::QuotaExceeded | ProviderError::ZeroResults => false,
        }
    }

    /// `None` for zero results, which is not a failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ProviderError::ZeroResults => None,
            ProviderError::Transport { offline: true, .. } => Some(FailureKind::Connectivity),
            ProviderError::Transport { offline: false, .. }
            | ProviderError::RequestDenied
            | ProviderError::QuotaExceeded => Some(FailureKind::ServiceUnavailable),
        }
    }
}

/// Reason a single raw record was left out of a normalized set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationDrop {
    #[error("record has no id")]
    MissingId,
    #[error("record {0} has no resolvable coordinate")]
    UnresolvableLocation(String),
    #[error("record {0} repeats an id already in the set")]
    DuplicateId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("query is empty after sanitizing")]
    EmptyQuery,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("price must be a finite, non-negative number")]
    InvalidPrice,
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("could not serialize cache entry {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("unknown restaurant {0}")]
    UnknownRestaurant(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}
