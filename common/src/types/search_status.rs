use crate::errors::{LocationError, ProviderError};
use crate::types::coordinate::{Coordinate, ProximityKey};
use crate::types::restaurant::Restaurant;
use crate::types::suggestion::Suggestion;
use serde::{Deserialize, Serialize};

/// Nearby-search lifecycle. `Done` has no transition back to `Searching`
/// for the same key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchPhase {
    Idle,
    Searching { key: ProximityKey },
    Done { key: ProximityKey },
}

/// Read-only view of the coordinator handed to consumers. The restaurant list
/// is a copy; nobody holds the cached data itself.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySnapshot {
    pub phase: SearchPhase,
    pub coordinate: Option<Coordinate>,
    pub restaurants: Vec<Restaurant>,
    pub from_cache: bool,
    pub error: Option<ProviderError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AutocompleteState {
    Empty,
    Fetching {
        query: String,
    },
    Suggesting {
        query: String,
        suggestions: Vec<Suggestion>,
    },
    Selected {
        restaurant: Restaurant,
    },
    SubmittedFullText {
        query: String,
        results: Vec<Restaurant>,
    },
}

impl AutocompleteState {
    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            AutocompleteState::Suggesting { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

/// Where a session stands after its one position attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionStatus {
    Pending,
    Fixed(Coordinate),
    Failed(LocationError),
}
