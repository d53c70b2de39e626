#![allow(dead_code)]

use async_trait::async_trait;
use common::errors::{LocationError, ProviderError};
use common::position::PositionSource;
use common::provider::{AutocompleteRequest, NearbySearchRequest, PlaceDetailsRequest, PlaceProvider};
use common::types::coordinate::Coordinate;
use common::types::raw_place::RawPlace;
use common::types::suggestion::Suggestion;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Scriptable provider that records every request it receives.
pub struct FakeProvider {
    pub nearby_response: Mutex<Result<Vec<RawPlace>, ProviderError>>,
    pub nearby_delay: Duration,
    pub nearby_requests: Mutex<Vec<NearbySearchRequest>>,
    pub autocomplete_requests: Mutex<Vec<AutocompleteRequest>>,
    pub autocomplete_error: Option<ProviderError>,
    /// Per-input artificial latency for suggestion fetches.
    pub slow_inputs: HashMap<String, Duration>,
    pub details: HashMap<String, RawPlace>,
    pub details_requests: Mutex<Vec<PlaceDetailsRequest>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            nearby_response: Mutex::new(Ok(Vec::new())),
            nearby_delay: Duration::ZERO,
            nearby_requests: Mutex::new(Vec::new()),
            autocomplete_requests: Mutex::new(Vec::new()),
            autocomplete_error: None,
            slow_inputs: HashMap::new(),
            details: HashMap::new(),
            details_requests: Mutex::new(Vec::new()),
        }
    }
}

impl FakeProvider {
    pub fn with_places(places: Vec<RawPlace>) -> Self {
        Self {
            nearby_response: Mutex::new(Ok(places)),
            ..Self::default()
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            nearby_response: Mutex::new(Err(error)),
            ..Self::default()
        }
    }

    pub fn nearby_calls(&self) -> usize {
        self.nearby_requests.lock().unwrap().len()
    }

    pub fn autocomplete_inputs(&self) -> Vec<String> {
        self.autocomplete_requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.input.clone())
            .collect()
    }
}

#[async_trait]
impl PlaceProvider for FakeProvider {
    async fn search_nearby(&self, request: NearbySearchRequest) -> Result<Vec<RawPlace>, ProviderError> {
        self.nearby_requests.lock().unwrap().push(request);
        if !self.nearby_delay.is_zero() {
            tokio::time::sleep(self.nearby_delay).await;
        }
        self.nearby_response.lock().unwrap().clone()
    }

    async fn autocomplete(&self, request: AutocompleteRequest) -> Result<Vec<Suggestion>, ProviderError> {
        let input = request.input.clone();
        self.autocomplete_requests.lock().unwrap().push(request);
        if let Some(delay) = self.slow_inputs.get(&input) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(error) = &self.autocomplete_error {
            return Err(error.clone());
        }
        Ok(vec![Suggestion {
            place_id: format!("place-{input}"),
            primary_text: input,
            secondary_text: None,
            distance_meters: None,
        }])
    }

    async fn place_details(&self, request: PlaceDetailsRequest) -> Result<RawPlace, ProviderError> {
        let place = self.details.get(&request.place_id).cloned();
        self.details_requests.lock().unwrap().push(request);
        place.ok_or(ProviderError::Transport {
            offline: false,
            message: "details unavailable".into(),
        })
    }
}

pub struct FailingPositionSource(pub LocationError);

#[async_trait]
impl PositionSource for FailingPositionSource {
    async fn acquire(&self) -> Result<Coordinate, LocationError> {
        Err(self.0)
    }
}

pub fn raw_place(id: &str, name: &str, lat: f64, lng: f64) -> RawPlace {
    serde_json::from_value(json!({
        "id": id,
        "displayName": {"text": name},
        "location": {"latitude": lat, "longitude": lng},
        "types": ["restaurant"]
    }))
    .unwrap()
}

pub fn downtown_places() -> Vec<RawPlace> {
    vec![
        raw_place("p1", "Sushi Place", 40.7251, -73.9993),
        raw_place("p2", "Pizza Hut", 40.7188, -73.9897),
    ]
}

pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(60)).await;
}
