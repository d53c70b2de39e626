use crate::client_actors::nearby_search::NearbySearchCoordinator;
use actix::prelude::*;
use colored::Color;
use common::config::DiscoveryConfig;
use common::errors::ProviderError;
use common::logger::Logger;
use common::matching::{SearchQuery, fuzzy_match_query};
use common::messages::{
    AutocompleteUpdated, EndSession, GetAutocompleteState, GetNearbyRestaurants, InputChanged,
    SelectSuggestion, SetLocationBias, SubmitQuery, SubscribeAutocomplete,
};
use common::normalize::normalize;
use common::persistence::PersistenceBackend;
use common::provider::{AutocompleteRequest, PlaceDetailsRequest, PlaceProvider};
use common::types::coordinate::Coordinate;
use common::types::raw_place::RawPlace;
use common::types::restaurant::Restaurant;
use common::types::search_status::AutocompleteState;
use common::types::suggestion::{SessionToken, Suggestion};
use std::sync::Arc;

/// The `AutocompleteSession` actor drives provider-backed suggestions for the
/// search box.
///
/// ## Responsibilities:
/// - Debounce keystrokes so only the text present after the quiet period is
///   fetched.
/// - Bind every suggestion fetch and the final detail fetch to one lazily
///   created [`SessionToken`], dropped on selection or full-text submit.
/// - Ignore responses for text that is no longer current.
/// - Fall back to local fuzzy search when a selection cannot be resolved.
/// - Upsert a resolved selection so deals can be attached to it even when it
///   lies outside the nearby set.
pub struct AutocompleteSession {
    provider: Arc<dyn PlaceProvider>,
    backend: Option<Arc<dyn PersistenceBackend>>,
    coordinator: Addr<NearbySearchCoordinator>,
    config: DiscoveryConfig,
    state: AutocompleteState,
    token: Option<SessionToken>,
    location_bias: Option<Coordinate>,
    /// Latest sanitized input; responses for anything else are stale.
    current_query: Option<String>,
    /// Bumped by every keystroke, selection or submit so late detail and
    /// local-search results of an earlier one are ignored.
    generation: u64,
    debounce: Option<SpawnHandle>,
    subscribers: Vec<Recipient<AutocompleteUpdated>>,
    logger: Logger,
}

impl AutocompleteSession {
    pub fn new(
        provider: Arc<dyn PlaceProvider>,
        coordinator: Addr<NearbySearchCoordinator>,
        config: DiscoveryConfig,
    ) -> Self {
        Self {
            provider,
            backend: None,
            coordinator,
            config,
            state: AutocompleteState::Empty,
            token: None,
            location_bias: None,
            current_query: None,
            generation: 0,
            debounce: None,
            subscribers: Vec::new(),
            logger: Logger::new("Autocomplete", Color::Magenta),
        }
    }

    pub fn with_backend(mut self, backend: Arc<dyn PersistenceBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    fn persist(&self, restaurant: &Restaurant, ctx: &mut Context<Self>) {
        let Some(backend) = self.backend.clone() else {
            return;
        };
        let row = [restaurant.clone()];
        let fut = async move { backend.upsert_restaurants(&row).await }
            .into_actor(self)
            .map(|result, act, _ctx| {
                if let Err(e) = result {
                    act.logger
                        .error(format!("Could not persist selected restaurant: {}", e));
                }
            });
        ctx.spawn(fut);
    }

    fn set_state(&mut self, state: AutocompleteState) {
        self.state = state;
        for subscriber in &self.subscribers {
            subscriber.do_send(AutocompleteUpdated {
                state: self.state.clone(),
            });
        }
    }

    fn cancel_debounce(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.debounce.take() {
            ctx.cancel_future(handle);
        }
    }

    fn end_billing_session(&mut self) {
        if let Some(token) = self.token.take() {
            self.logger.debug(format!("Session token {} closed", token));
        }
    }

    fn dispatch_fetch(&mut self, query: String, ctx: &mut Context<Self>) {
        let token = *self.token.get_or_insert_with(SessionToken::new);
        let request = AutocompleteRequest {
            input: query.clone(),
            session_token: token,
            location_bias: self.location_bias,
        };
        self.logger
            .debug(format!("Fetching suggestions for \"{}\"", query));
        self.set_state(AutocompleteState::Fetching {
            query: query.clone(),
        });

        let provider = self.provider.clone();
        let fut = async move { provider.autocomplete(request).await }
            .into_actor(self)
            .map(move |result, act, _ctx| act.handle_suggestions(query, result));
        ctx.spawn(fut);
    }

    fn handle_suggestions(&mut self, query: String, result: Result<Vec<Suggestion>, ProviderError>) {
        if self.current_query.as_deref() != Some(query.as_str()) {
            self.logger
                .debug(format!("Discarding stale suggestions for \"{}\"", query));
            return;
        }
        match result {
            Ok(suggestions) => self.set_state(AutocompleteState::Suggesting { query, suggestions }),
            Err(e) => {
                self.logger
                    .warn(format!("Autocomplete failed for \"{}\": {}", query, e));
                self.set_state(AutocompleteState::Empty);
            }
        }
    }

    fn handle_details(
        &mut self,
        typed: Option<String>,
        result: Result<RawPlace, ProviderError>,
        ctx: &mut Context<Self>,
    ) {
        let failure = match result {
            Ok(raw) => match normalize(&raw) {
                Ok(restaurant) => {
                    self.logger
                        .info(format!("Selected {} ({})", restaurant.name, restaurant.id));
                    self.persist(&restaurant, ctx);
                    self.set_state(AutocompleteState::Selected { restaurant });
                    return;
                }
                Err(drop) => drop.to_string(),
            },
            Err(e) => e.to_string(),
        };
        self.logger
            .warn(format!("Could not resolve selection: {}", failure));
        match typed.and_then(|text| SearchQuery::parse_capped(&text, self.config.max_query_chars).ok()) {
            Some(query) => self.run_local_search(query, ctx),
            None => self.set_state(AutocompleteState::Empty),
        }
    }

    /// Fuzzy search over the coordinator's current restaurant set.
    fn run_local_search(&mut self, query: SearchQuery, ctx: &mut Context<Self>) {
        let generation = self.generation;
        let fut = self
            .coordinator
            .send(GetNearbyRestaurants)
            .into_actor(self)
            .map(move |result, act, _ctx| {
                if act.generation != generation {
                    return;
                }
                let restaurants = match result {
                    Ok(snapshot) => snapshot.restaurants,
                    Err(e) => {
                        act.logger
                            .error(format!("Could not read nearby restaurants: {}", e));
                        Vec::new()
                    }
                };
                let results = fuzzy_match_query(&query, &restaurants);
                act.logger.info(format!(
                    "{} local matches for \"{}\"",
                    results.len(),
                    query.text
                ));
                act.set_state(AutocompleteState::SubmittedFullText {
                    query: query.text,
                    results,
                });
            });
        ctx.spawn(fut);
    }
}

impl Actor for AutocompleteSession {
    type Context = Context<Self>;
}

impl Handler<InputChanged> for AutocompleteSession {
    type Result = ();

    fn handle(&mut self, msg: InputChanged, ctx: &mut Self::Context) -> Self::Result {
        self.cancel_debounce(ctx);
        self.generation += 1;
        let query = match SearchQuery::parse_capped(&msg.text, self.config.max_query_chars) {
            Ok(query) => query.text,
            Err(_) => {
                self.current_query = None;
                self.set_state(AutocompleteState::Empty);
                return;
            }
        };
        self.current_query = Some(query.clone());
        let handle = ctx.run_later(self.config.debounce, move |act, ctx| {
            act.debounce = None;
            act.dispatch_fetch(query, ctx);
        });
        self.debounce = Some(handle);
    }
}

impl Handler<SelectSuggestion> for AutocompleteSession {
    type Result = ();

    fn handle(&mut self, msg: SelectSuggestion, ctx: &mut Self::Context) -> Self::Result {
        self.cancel_debounce(ctx);
        let session_token = self.token.unwrap_or_default();
        self.end_billing_session();
        let typed = self.current_query.take();
        self.generation += 1;
        let generation = self.generation;

        let request = PlaceDetailsRequest {
            place_id: msg.place_id,
            session_token,
            fields: self.config.detail_fields.clone(),
        };
        let provider = self.provider.clone();
        let fut = async move { provider.place_details(request).await }
            .into_actor(self)
            .map(move |result, act, ctx| {
                if act.generation != generation {
                    act.logger.debug("Discarding stale place details");
                    return;
                }
                act.handle_details(typed, result, ctx);
            });
        ctx.spawn(fut);
    }
}

impl Handler<SubmitQuery> for AutocompleteSession {
    type Result = ();

    fn handle(&mut self, msg: SubmitQuery, ctx: &mut Self::Context) -> Self::Result {
        self.cancel_debounce(ctx);
        self.end_billing_session();
        self.current_query = None;
        self.generation += 1;
        match SearchQuery::parse_capped(&msg.text, self.config.max_query_chars) {
            Ok(query) => self.run_local_search(query, ctx),
            Err(_) => self.set_state(AutocompleteState::Empty),
        }
    }
}

impl Handler<SetLocationBias> for AutocompleteSession {
    type Result = ();

    fn handle(&mut self, msg: SetLocationBias, _ctx: &mut Self::Context) -> Self::Result {
        self.location_bias = Some(msg.coordinate);
    }
}

impl Handler<GetAutocompleteState> for AutocompleteSession {
    type Result = MessageResult<GetAutocompleteState>;

    fn handle(&mut self, _msg: GetAutocompleteState, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.state.clone())
    }
}

impl Handler<SubscribeAutocomplete> for AutocompleteSession {
    type Result = ();

    fn handle(&mut self, msg: SubscribeAutocomplete, _ctx: &mut Self::Context) -> Self::Result {
        self.subscribers.push(msg.recipient);
    }
}

impl Handler<EndSession> for AutocompleteSession {
    type Result = ();

    fn handle(&mut self, _msg: EndSession, ctx: &mut Self::Context) -> Self::Result {
        self.cancel_debounce(ctx);
        self.end_billing_session();
        self.current_query = None;
        self.subscribers.clear();
        ctx.stop();
    }
}
