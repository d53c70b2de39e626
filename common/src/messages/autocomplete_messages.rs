use crate::types::coordinate::Coordinate;
use crate::types::search_status::AutocompleteState;
use actix::{Message, Recipient};

/// Message for every change of the search input, one per keystroke.
///
/// ## Purpose
/// Restarts the debounce timer; only the text present when the quiet period
/// elapses is sent to the provider.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct InputChanged {
    pub text: String,
}

/// Message selecting one of the current suggestions by its place handle.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct SelectSuggestion {
    pub place_id: String,
}

/// Message submitting typed text as a plain local search, skipping
/// suggestions.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct SubmitQuery {
    pub text: String,
}

/// Message updating the location used to bias suggestions.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct SetLocationBias {
    pub coordinate: Coordinate,
}

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "AutocompleteState")]
pub struct GetAutocompleteState;

#[derive(Message)]
#[rtype(result = "()")]
pub struct SubscribeAutocomplete {
    pub recipient: Recipient<AutocompleteUpdated>,
}

/// Message published on every autocomplete state change.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct AutocompleteUpdated {
    pub state: AutocompleteState,
}
