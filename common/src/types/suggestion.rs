use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One autocomplete prediction. `place_id` is the handle used for the
/// place-detail fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub place_id: String,
    pub primary_text: String,
    pub secondary_text: Option<String>,
    pub distance_meters: Option<f64>,
}

/// Groups suggestion fetches and the final detail fetch into one billable
/// provider session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
