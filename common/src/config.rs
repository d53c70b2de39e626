use crate::constants::{
    DEBOUNCE_DELAY, DETAIL_FIELDS, MAX_QUERY_CHARS, MAX_RESULT_COUNT, POSITION_TIMEOUT,
    RESTAURANT_CATEGORY, SEARCH_RADIUS_METERS,
};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::path::Path;
use std::time::Duration;

/// Tunables for one discovery session. Any field missing from a config file
/// keeps its default.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub search_radius_meters: f64,
    pub max_result_count: u32,
    pub category: String,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "debounce_millis")]
    pub debounce: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "position_timeout_millis")]
    pub position_timeout: Duration,
    pub detail_fields: Vec<String>,
    pub max_query_chars: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            search_radius_meters: SEARCH_RADIUS_METERS,
            max_result_count: MAX_RESULT_COUNT,
            category: RESTAURANT_CATEGORY.to_string(),
            debounce: DEBOUNCE_DELAY,
            position_timeout: POSITION_TIMEOUT,
            detail_fields: DETAIL_FIELDS.iter().map(|f| f.to_string()).collect(),
            max_query_chars: MAX_QUERY_CHARS,
        }
    }
}

impl DiscoveryConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.search_radius_meters.is_finite() && self.search_radius_meters > 0.0) {
            return Err(ConfigError::Invalid(
                "search_radius_meters must be positive".into(),
            ));
        }
        if self.max_result_count == 0 {
            return Err(ConfigError::Invalid("max_result_count must be at least 1".into()));
        }
        if self.category.trim().is_empty() {
            return Err(ConfigError::Invalid("category must not be empty".into()));
        }
        if self.max_query_chars == 0 {
            return Err(ConfigError::Invalid("max_query_chars must be at least 1".into()));
        }
        Ok(())
    }
}
