use crate::errors::ProviderError;
use crate::normalize::{resolve_address, resolve_id, resolve_location, resolve_name};
use crate::types::coordinate::Coordinate;
use crate::types::raw_place::RawPlace;
use crate::types::suggestion::{SessionToken, Suggestion};
use crate::utils::calculate_distance;
use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearchRequest {
    pub center: Coordinate,
    pub radius_meters: f64,
    pub category: String,
    pub max_result_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutocompleteRequest {
    pub input: String,
    pub session_token: SessionToken,
    pub location_bias: Option<Coordinate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetailsRequest {
    pub place_id: String,
    pub session_token: SessionToken,
    pub fields: Vec<String>,
}

/// The external place-data provider. Calls are opaque remote operations with
/// no retry contract.
#[async_trait]
pub trait PlaceProvider: Send + Sync {
    async fn search_nearby(&self, request: NearbySearchRequest) -> Result<Vec<RawPlace>, ProviderError>;

    async fn autocomplete(&self, request: AutocompleteRequest) -> Result<Vec<Suggestion>, ProviderError>;

    async fn place_details(&self, request: PlaceDetailsRequest) -> Result<RawPlace, ProviderError>;
}

/// Serves a fixed set of raw records loaded from a JSON array. Used by the
/// terminal binary in place of a live provider.
#[derive(Debug, Clone, Default)]
pub struct FixturePlaceProvider {
    places: Vec<RawPlace>,
}

impl FixturePlaceProvider {
    pub fn new(places: Vec<RawPlace>) -> Self {
        Self { places }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ProviderError::Transport {
            offline: true,
            message: format!("{}: {}", path.display(), e),
        })?;
        let places = serde_json::from_str(&contents).map_err(|e| ProviderError::Transport {
            offline: false,
            message: format!("{}: {}", path.display(), e),
        })?;
        Ok(Self::new(places))
    }

    fn name_of(place: &RawPlace) -> &str {
        resolve_name(place).unwrap_or_default()
    }
}

#[async_trait]
impl PlaceProvider for FixturePlaceProvider {
    async fn search_nearby(&self, request: NearbySearchRequest) -> Result<Vec<RawPlace>, ProviderError> {
        let nearby: Vec<RawPlace> = self
            .places
            .iter()
            .filter(|place| {
                place
                    .types
                    .as_ref()
                    .is_some_and(|types| types.iter().any(|t| t == &request.category))
            })
            .filter(|place| {
                resolve_location(place).is_some_and(|location| {
                    calculate_distance(location, request.center) <= request.radius_meters
                })
            })
            .take(request.max_result_count as usize)
            .cloned()
            .collect();
        if nearby.is_empty() {
            return Err(ProviderError::ZeroResults);
        }
        Ok(nearby)
    }

    async fn autocomplete(&self, request: AutocompleteRequest) -> Result<Vec<Suggestion>, ProviderError> {
        let needle = request.input.to_lowercase();
        let mut suggestions: Vec<Suggestion> = self
            .places
            .iter()
            .filter(|place| Self::name_of(place).to_lowercase().contains(&needle))
            .filter_map(|place| {
                let place_id = resolve_id(place)?.to_string();
                let distance_meters = match (request.location_bias, resolve_location(place)) {
                    (Some(bias), Some(location)) => Some(calculate_distance(bias, location)),
                    _ => None,
                };
                Some(Suggestion {
                    place_id,
                    primary_text: Self::name_of(place).to_string(),
                    secondary_text: resolve_address(place).map(str::to_string),
                    distance_meters,
                })
            })
            .collect();
        suggestions.sort_by(|a, b| {
            let a = a.distance_meters.unwrap_or(f64::MAX);
            let b = b.distance_meters.unwrap_or(f64::MAX);
            a.total_cmp(&b)
        });
        Ok(suggestions)
    }

    async fn place_details(&self, request: PlaceDetailsRequest) -> Result<RawPlace, ProviderError> {
        self.places
            .iter()
            .find(|place| resolve_id(place) == Some(request.place_id.as_str()))
            .cloned()
            .ok_or(ProviderError::ZeroResults)
    }
}
