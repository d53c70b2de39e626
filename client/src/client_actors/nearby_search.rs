use actix::prelude::*;
use colored::Color;
use common::cache::ResultCache;
use common::config::DiscoveryConfig;
use common::errors::ProviderError;
use common::logger::Logger;
use common::messages::{
    EndSession, GetNearbyRestaurants, NearbyRestaurantsReady, PositionAcquired, SubscribeNearby,
};
use common::normalize::normalize_all;
use common::persistence::PersistenceBackend;
use common::provider::{NearbySearchRequest, PlaceProvider};
use common::types::coordinate::{Coordinate, ProximityKey};
use common::types::raw_place::RawPlace;
use common::types::restaurant::Restaurant;
use common::types::search_status::{NearbySnapshot, SearchPhase};
use std::collections::HashSet;
use std::sync::Arc;

enum SearchState {
    Idle,
    Searching {
        key: ProximityKey,
        coordinate: Coordinate,
    },
    Done {
        key: ProximityKey,
        coordinate: Coordinate,
        restaurants: Vec<Restaurant>,
        from_cache: bool,
        error: Option<ProviderError>,
    },
}

/// The `NearbySearchCoordinator` actor turns a position fix into the
/// session's restaurant set.
///
/// ## Responsibilities:
/// - Serve a fix from the [`ResultCache`] when its rounded key is cached.
/// - Otherwise issue exactly one bounded nearby search for that key,
///   normalize the response and cache it.
/// - Publish every `Done` transition to its subscribers.
///
/// A key is queried at most once per session, whether or not the attempt
/// succeeded. A fix arriving while a search is in flight waits for it and is
/// evaluated afterwards.
pub struct NearbySearchCoordinator {
    provider: Arc<dyn PlaceProvider>,
    backend: Option<Arc<dyn PersistenceBackend>>,
    cache: ResultCache,
    config: DiscoveryConfig,
    state: SearchState,
    attempted: HashSet<ProximityKey>,
    pending: Option<Coordinate>,
    subscribers: Vec<Recipient<NearbyRestaurantsReady>>,
    logger: Logger,
}

impl NearbySearchCoordinator {
    pub fn new(provider: Arc<dyn PlaceProvider>, cache: ResultCache, config: DiscoveryConfig) -> Self {
        Self {
            provider,
            backend: None,
            cache,
            config,
            state: SearchState::Idle,
            attempted: HashSet::new(),
            pending: None,
            subscribers: Vec::new(),
            logger: Logger::new("Nearby Search", Color::Green),
        }
    }

    /// Upserts every freshly fetched set into `backend`.
    pub fn with_backend(mut self, backend: Arc<dyn PersistenceBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    fn snapshot(&self) -> NearbySnapshot {
        match &self.state {
            SearchState::Idle => NearbySnapshot {
                phase: SearchPhase::Idle,
                coordinate: None,
                restaurants: Vec::new(),
                from_cache: false,
                error: None,
            },
            SearchState::Searching { key, coordinate } => NearbySnapshot {
                phase: SearchPhase::Searching { key: key.clone() },
                coordinate: Some(*coordinate),
                restaurants: Vec::new(),
                from_cache: false,
                error: None,
            },
            SearchState::Done {
                key,
                coordinate,
                restaurants,
                from_cache,
                error,
            } => NearbySnapshot {
                phase: SearchPhase::Done { key: key.clone() },
                coordinate: Some(*coordinate),
                restaurants: restaurants.clone(),
                from_cache: *from_cache,
                error: error.clone(),
            },
        }
    }

    fn evaluate(&mut self, coordinate: Coordinate, ctx: &mut Context<Self>) {
        let key = coordinate.proximity_key();
        self.state = SearchState::Searching {
            key: key.clone(),
            coordinate,
        };

        if let Some(cached) = self.cache.get(&coordinate) {
            self.logger
                .info(format!("Using cached restaurant data for {}", key));
            self.finish(coordinate, cached, true, None, ctx);
            return;
        }

        if !self.attempted.insert(key.clone()) {
            self.logger.warn(format!(
                "Nearby search for {} already attempted this session, not querying again",
                key
            ));
            self.finish(coordinate, Vec::new(), false, None, ctx);
            return;
        }

        let request = NearbySearchRequest {
            center: coordinate,
            radius_meters: self.config.search_radius_meters,
            category: self.config.category.clone(),
            max_result_count: self.config.max_result_count,
        };
        self.logger
            .info(format!("Searching for restaurants near {}", coordinate));

        let provider = self.provider.clone();
        let fut = async move { provider.search_nearby(request).await }
            .into_actor(self)
            .map(move |result, act, ctx| act.handle_search_result(coordinate, result, ctx));
        ctx.spawn(fut);
    }

    fn handle_search_result(
        &mut self,
        coordinate: Coordinate,
        result: Result<Vec<RawPlace>, ProviderError>,
        ctx: &mut Context<Self>,
    ) {
        match result {
            Ok(raws) => {
                let restaurants = normalize_all(&raws, &self.logger);
                self.logger.info(format!(
                    "Found {} restaurants ({} raw places)",
                    restaurants.len(),
                    raws.len()
                ));
                if let Err(e) = self.cache.put(&coordinate, &restaurants) {
                    self.logger.error(format!("Could not cache results: {}", e));
                }
                self.persist(&restaurants, ctx);
                self.finish(coordinate, restaurants, false, None, ctx);
            }
            Err(e) if e.is_zero_results() => {
                self.logger.info("No restaurants found in this area");
                self.finish(coordinate, Vec::new(), false, None, ctx);
            }
            Err(e) => {
                if e.is_fatal() {
                    self.logger.error(format!("Places search failed: {}", e));
                } else {
                    self.logger.warn(format!("Places search failed: {}", e));
                }
                self.finish(coordinate, Vec::new(), false, Some(e), ctx);
            }
        }
    }

    fn persist(&self, restaurants: &[Restaurant], ctx: &mut Context<Self>) {
        let Some(backend) = self.backend.clone() else {
            return;
        };
        let rows = restaurants.to_vec();
        let fut = async move { backend.upsert_restaurants(&rows).await }
            .into_actor(self)
            .map(|result, act, _ctx| match result {
                Ok(count) => act.logger.debug(format!("Upserted {} restaurants", count)),
                Err(e) => act.logger.error(format!("Could not persist restaurants: {}", e)),
            });
        ctx.spawn(fut);
    }

    fn finish(
        &mut self,
        coordinate: Coordinate,
        restaurants: Vec<Restaurant>,
        from_cache: bool,
        error: Option<ProviderError>,
        ctx: &mut Context<Self>,
    ) {
        let key = coordinate.proximity_key();
        self.state = SearchState::Done {
            key: key.clone(),
            coordinate,
            restaurants,
            from_cache,
            error,
        };

        let snapshot = self.snapshot();
        for subscriber in &self.subscribers {
            subscriber.do_send(NearbyRestaurantsReady {
                snapshot: snapshot.clone(),
            });
        }

        if let Some(next) = self.pending.take() {
            if next.proximity_key() != key {
                self.evaluate(next, ctx);
            }
        }
    }
}

impl Actor for NearbySearchCoordinator {
    type Context = Context<Self>;
}

impl Handler<PositionAcquired> for NearbySearchCoordinator {
    type Result = ();

    fn handle(&mut self, msg: PositionAcquired, ctx: &mut Self::Context) -> Self::Result {
        let key = msg.coordinate.proximity_key();
        match &self.state {
            SearchState::Searching { key: current, .. } => {
                if *current != key {
                    self.logger.debug(format!(
                        "Search for {} in flight, {} queued",
                        current, key
                    ));
                    self.pending = Some(msg.coordinate);
                }
            }
            SearchState::Done { key: current, .. } if *current == key => {
                self.logger
                    .debug(format!("Already done for {}, nothing to do", key));
            }
            SearchState::Idle | SearchState::Done { .. } => self.evaluate(msg.coordinate, ctx),
        }
    }
}

impl Handler<GetNearbyRestaurants> for NearbySearchCoordinator {
    type Result = MessageResult<GetNearbyRestaurants>;

    fn handle(&mut self, _msg: GetNearbyRestaurants, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.snapshot())
    }
}

impl Handler<SubscribeNearby> for NearbySearchCoordinator {
    type Result = ();

    fn handle(&mut self, msg: SubscribeNearby, _ctx: &mut Self::Context) -> Self::Result {
        if matches!(self.state, SearchState::Done { .. }) {
            msg.recipient.do_send(NearbyRestaurantsReady {
                snapshot: self.snapshot(),
            });
        }
        self.subscribers.push(msg.recipient);
    }
}

impl Handler<EndSession> for NearbySearchCoordinator {
    type Result = ();

    fn handle(&mut self, _msg: EndSession, ctx: &mut Self::Context) -> Self::Result {
        self.logger.info(format!(
            "Session ended, dropping {} cached entries",
            self.cache.len()
        ));
        self.cache.clear();
        self.subscribers.clear();
        self.pending = None;
        ctx.stop();
    }
}
