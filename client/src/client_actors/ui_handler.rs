use crate::messages::internal_messages::UIMessage;
use actix::prelude::*;
use colored::Color;
use common::errors::{FailureKind, LocationError};
use common::logger::Logger;
use common::messages::{AutocompleteUpdated, NearbyRestaurantsReady};
use common::types::restaurant::Restaurant;
use common::types::search_status::{AutocompleteState, SearchPhase};

/// Title and body shown for a provider failure bucket.
pub fn failure_message(kind: FailureKind) -> (&'static str, &'static str) {
    match kind {
        FailureKind::Connectivity => (
            "No internet connection",
            "Check your connection and try again.",
        ),
        FailureKind::ServiceUnavailable => (
            "Service temporarily unavailable",
            "Restaurant data could not be loaded right now. Please try again later.",
        ),
    }
}

pub fn location_message(error: LocationError) -> (&'static str, &'static str) {
    match error {
        LocationError::PermissionDenied => (
            "Location access denied",
            "Allow location access to find restaurants near you.",
        ),
        LocationError::Unavailable => (
            "Location unavailable",
            "Your position could not be determined. You can still search by name.",
        ),
        LocationError::Timeout => (
            "Location request timed out",
            "Finding your position took too long. You can still search by name.",
        ),
        LocationError::Unknown => (
            "Location error",
            "Something went wrong while finding your position.",
        ),
    }
}

/// Actor UIHandler: renders both search paths to the terminal.
pub struct UIHandler {
    pub logger: Logger,
}

impl UIHandler {
    pub fn new() -> Self {
        UIHandler {
            logger: Logger::new("UI", Color::BrightBlue),
        }
    }

    fn show_restaurants(&self, restaurants: &[Restaurant]) {
        for (i, restaurant) in restaurants.iter().enumerate() {
            self.logger.info(format!(
                "{}: {} | {} | {} | {}",
                i + 1,
                restaurant.name,
                restaurant.address_label(),
                restaurant.rating_label(),
                restaurant.cuisine_label()
            ));
        }
    }
}

impl Default for UIHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for UIHandler {
    type Context = Context<Self>;
}

impl Handler<NearbyRestaurantsReady> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: NearbyRestaurantsReady, _ctx: &mut Self::Context) {
        let snapshot = msg.snapshot;
        if let Some(kind) = snapshot.error.as_ref().and_then(|e| e.failure_kind()) {
            let (title, body) = failure_message(kind);
            self.logger.error(format!("{}: {}", title, body));
            return;
        }
        if let SearchPhase::Done { key } = &snapshot.phase {
            self.logger.info(format!(
                "Restaurants found: {} (area {}{})",
                snapshot.restaurants.len(),
                key,
                if snapshot.from_cache { ", cached" } else { "" }
            ));
        }
        if snapshot.restaurants.is_empty() {
            self.logger.warn("No restaurants found in this area.");
        }
    }
}

impl Handler<AutocompleteUpdated> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: AutocompleteUpdated, _ctx: &mut Self::Context) {
        match msg.state {
            AutocompleteState::Empty | AutocompleteState::Fetching { .. } => {}
            AutocompleteState::Suggesting { query, suggestions } => {
                if suggestions.is_empty() {
                    self.logger.warn(format!("No suggestions for \"{}\"", query));
                }
                for (i, suggestion) in suggestions.iter().enumerate() {
                    self.logger.info(format!(
                        "{}: {} {}",
                        i + 1,
                        suggestion.primary_text,
                        suggestion.secondary_text.as_deref().unwrap_or_default()
                    ));
                }
            }
            AutocompleteState::Selected { restaurant } => {
                self.show_restaurants(std::slice::from_ref(&restaurant));
                self.logger.info(restaurant.maps_url());
            }
            AutocompleteState::SubmittedFullText { query, results } => {
                if results.is_empty() {
                    self.logger
                        .warn(format!("No restaurants found for \"{}\"", query));
                }
                self.show_restaurants(&results);
            }
        }
    }
}

impl Handler<UIMessage> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: UIMessage, _ctx: &mut Self::Context) {
        match msg {
            UIMessage::ShowMessage(text) => self.logger.info(text),
            UIMessage::LocationFailed(error) => {
                let (title, body) = location_message(error);
                self.logger.error(format!("{}: {}", title, body));
            }
        }
    }
}
