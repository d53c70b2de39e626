use crate::client_actors::autocomplete::AutocompleteSession;
use crate::client_actors::nearby_search::NearbySearchCoordinator;
use actix::prelude::*;
use colored::Color;
use common::cache::{InMemorySessionStore, ResultCache};
use common::config::DiscoveryConfig;
use common::logger::Logger;
use common::messages::{EndSession, PositionAcquired, SetLocationBias};
use common::persistence::PersistenceBackend;
use common::position::{PositionSource, acquire_with_timeout};
use common::provider::PlaceProvider;
use common::types::search_status::PositionStatus;
use std::sync::Arc;

/// Everything scoped to one browsing session: the result cache and its
/// session store (owned by the coordinator), the autocomplete token and
/// debounce timer (owned by the autocomplete actor) and the single position
/// attempt. Created at session start, torn down by [`DiscoverySession::end`].
pub struct DiscoverySession {
    pub coordinator: Addr<NearbySearchCoordinator>,
    pub autocomplete: Addr<AutocompleteSession>,
    pub config: DiscoveryConfig,
    position: PositionStatus,
    logger: Logger,
}

impl DiscoverySession {
    /// Starts the session actors on the current arbiter.
    pub fn start(
        config: DiscoveryConfig,
        provider: Arc<dyn PlaceProvider>,
        backend: Option<Arc<dyn PersistenceBackend>>,
    ) -> Self {
        let cache = ResultCache::new(Box::new(InMemorySessionStore::new()));
        let mut coordinator = NearbySearchCoordinator::new(provider.clone(), cache, config.clone());
        if let Some(backend) = backend.clone() {
            coordinator = coordinator.with_backend(backend);
        }
        let coordinator = coordinator.start();
        let mut autocomplete = AutocompleteSession::new(provider, coordinator.clone(), config.clone());
        if let Some(backend) = backend {
            autocomplete = autocomplete.with_backend(backend);
        }
        let autocomplete = autocomplete.start();

        Self {
            coordinator,
            autocomplete,
            config,
            position: PositionStatus::Pending,
            logger: Logger::new("Session", Color::White),
        }
    }

    pub fn position(&self) -> PositionStatus {
        self.position
    }

    /// Makes the session's one position attempt and hands a fix to the
    /// coordinator and the autocomplete bias. Later calls return the first
    /// outcome without asking the source again.
    pub async fn locate(&mut self, source: &dyn PositionSource) -> PositionStatus {
        if self.position != PositionStatus::Pending {
            return self.position;
        }
        self.position = match acquire_with_timeout(source, self.config.position_timeout).await {
            Ok(coordinate) => {
                self.logger.info(format!("Position fixed at {}", coordinate));
                self.coordinator.do_send(PositionAcquired { coordinate });
                self.autocomplete.do_send(SetLocationBias { coordinate });
                PositionStatus::Fixed(coordinate)
            }
            Err(e) => {
                self.logger.error(format!("Error getting location: {}", e));
                PositionStatus::Failed(e)
            }
        };
        self.position
    }

    pub fn end(self) {
        self.logger.info("Ending session");
        self.autocomplete.do_send(EndSession);
        self.coordinator.do_send(EndSession);
    }
}
