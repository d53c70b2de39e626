mod support;

use client::session::DiscoverySession;
use common::config::DiscoveryConfig;
use common::errors::ProviderError;
use common::messages::{GetAutocompleteState, InputChanged, SelectSuggestion, SubmitQuery};
use common::normalize::normalize;
use common::persistence::{InMemoryBackend, PersistenceBackend};
use common::position::FixedPositionSource;
use common::provider::PlaceProvider;
use common::types::coordinate::Coordinate;
use common::types::deal::NewDeal;
use common::types::search_status::{AutocompleteState, PositionStatus};
use std::sync::Arc;
use std::time::Duration;
use support::{FakeProvider, downtown_places, raw_place};

const HERE: Coordinate = Coordinate {
    lat: 40.72051,
    lng: -73.99612,
};

fn config() -> DiscoveryConfig {
    DiscoveryConfig {
        debounce: Duration::from_millis(50),
        ..DiscoveryConfig::default()
    }
}

async fn located_session(provider: Arc<FakeProvider>) -> DiscoverySession {
    let shared: Arc<dyn PlaceProvider> = provider;
    let mut session = DiscoverySession::start(config(), shared, None);
    let status = session.locate(&FixedPositionSource::new(HERE)).await;
    assert_eq!(status, PositionStatus::Fixed(HERE));
    session
}

fn type_text(session: &DiscoverySession, text: &str) {
    session.autocomplete.do_send(InputChanged {
        text: text.to_string(),
    });
}

async fn state(session: &DiscoverySession) -> AutocompleteState {
    session.autocomplete.send(GetAutocompleteState).await.unwrap()
}

async fn quiet_period() {
    tokio::time::sleep(Duration::from_millis(200)).await;
}

#[actix::test]
async fn keystrokes_inside_the_debounce_window_fetch_only_the_last_text() {
    let provider = Arc::new(FakeProvider::with_places(downtown_places()));
    let session = located_session(provider.clone()).await;

    type_text(&session, "piz");
    type_text(&session, "pizza");
    quiet_period().await;

    assert_eq!(provider.autocomplete_inputs(), vec!["pizza"]);
    match state(&session).await {
        AutocompleteState::Suggesting { query, suggestions } => {
            assert_eq!(query, "pizza");
            assert_eq!(suggestions.len(), 1);
        }
        other => panic!("unexpected state {:?}", other),
    }
    let requests = provider.autocomplete_requests.lock().unwrap().clone();
    assert_eq!(requests[0].location_bias, Some(HERE));
}

#[actix::test]
async fn input_that_sanitizes_to_nothing_clears_without_fetching() {
    let provider = Arc::new(FakeProvider::with_places(downtown_places()));
    let session = located_session(provider.clone()).await;

    type_text(&session, "sushi");
    quiet_period().await;
    type_text(&session, " <b></b> &;`\" ");
    quiet_period().await;

    assert_eq!(provider.autocomplete_inputs(), vec!["sushi"]);
    assert_eq!(state(&session).await, AutocompleteState::Empty);
}

#[actix::test]
async fn a_slow_response_for_older_text_is_discarded() {
    let mut provider = FakeProvider::with_places(downtown_places());
    provider
        .slow_inputs
        .insert("sus".to_string(), Duration::from_millis(300));
    let provider = Arc::new(provider);
    let session = located_session(provider.clone()).await;

    type_text(&session, "sus");
    tokio::time::sleep(Duration::from_millis(100)).await;
    type_text(&session, "sushi");
    quiet_period().await;

    let fresh = AutocompleteState::Suggesting {
        query: "sushi".to_string(),
        suggestions: state(&session).await.suggestions().to_vec(),
    };
    assert_eq!(state(&session).await, fresh);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(provider.autocomplete_inputs(), vec!["sus", "sushi"]);
    assert_eq!(state(&session).await, fresh);
}

#[actix::test]
async fn one_token_spans_fetches_until_a_selection() {
    let mut provider = FakeProvider::with_places(downtown_places());
    provider.details.insert(
        "place-pizza".to_string(),
        raw_place("place-pizza", "Pizza Hut", 40.7188, -73.9897),
    );
    let provider = Arc::new(provider);
    let session = located_session(provider.clone()).await;

    type_text(&session, "piz");
    quiet_period().await;
    type_text(&session, "pizza");
    quiet_period().await;
    session.autocomplete.do_send(SelectSuggestion {
        place_id: "place-pizza".to_string(),
    });
    quiet_period().await;
    type_text(&session, "tacos");
    quiet_period().await;

    let tokens: Vec<_> = provider
        .autocomplete_requests
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.session_token)
        .collect();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0], tokens[1]);
    assert_ne!(tokens[1], tokens[2]);

    let details = provider.details_requests.lock().unwrap().clone();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].session_token, tokens[0]);
    assert_eq!(details[0].fields, config().detail_fields);
}

#[actix::test]
async fn a_selection_resolves_to_a_normalized_restaurant() {
    let pizza = raw_place("place-pizza", "Pizza Hut", 40.7188, -73.9897);
    let mut provider = FakeProvider::with_places(downtown_places());
    provider
        .details
        .insert("place-pizza".to_string(), pizza.clone());
    let provider = Arc::new(provider);
    let session = located_session(provider).await;

    type_text(&session, "pizza");
    quiet_period().await;
    session.autocomplete.do_send(SelectSuggestion {
        place_id: "place-pizza".to_string(),
    });
    quiet_period().await;

    assert_eq!(
        state(&session).await,
        AutocompleteState::Selected {
            restaurant: normalize(&pizza).unwrap()
        }
    );
}

#[actix::test]
async fn a_selection_outside_the_nearby_set_can_take_deals() {
    let far = raw_place("place-far", "Far Noodles", 40.7831, -73.9712);
    let mut provider = FakeProvider::with_places(downtown_places());
    provider.details.insert("place-far".to_string(), far);
    let provider: Arc<dyn PlaceProvider> = Arc::new(provider);
    let backend = Arc::new(InMemoryBackend::new());
    let shared: Arc<dyn PersistenceBackend> = backend.clone();
    let mut session = DiscoverySession::start(config(), provider, Some(shared));
    session.locate(&FixedPositionSource::new(HERE)).await;

    type_text(&session, "far");
    quiet_period().await;
    session.autocomplete.do_send(SelectSuggestion {
        place_id: "place-far".to_string(),
    });
    quiet_period().await;

    assert!(matches!(state(&session).await, AutocompleteState::Selected { .. }));
    let deal = backend
        .create_deal(NewDeal {
            title: "Lunch special".to_string(),
            description: "Two bowls".to_string(),
            price: 18.0,
            link: None,
            restaurant_id: "place-far".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(deal.restaurant_id, "place-far");
    assert!(backend.restaurant("p1").await.is_some());
}

#[actix::test]
async fn an_unresolvable_selection_falls_back_to_local_search() {
    let provider = Arc::new(FakeProvider::with_places(downtown_places()));
    let session = located_session(provider.clone()).await;

    type_text(&session, "piza");
    quiet_period().await;
    session.autocomplete.do_send(SelectSuggestion {
        place_id: "place-piza".to_string(),
    });
    quiet_period().await;

    match state(&session).await {
        AutocompleteState::SubmittedFullText { query, results } => {
            assert_eq!(query, "piza");
            let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, vec!["Pizza Hut"]);
        }
        other => panic!("unexpected state {:?}", other),
    }
    assert_eq!(provider.details_requests.lock().unwrap().len(), 1);
}

#[actix::test]
async fn submitting_full_text_runs_fuzzy_search_and_drops_the_token() {
    let provider = Arc::new(FakeProvider::with_places(downtown_places()));
    let session = located_session(provider.clone()).await;

    type_text(&session, "pzza");
    quiet_period().await;
    session.autocomplete.do_send(SubmitQuery {
        text: "pzza".to_string(),
    });
    quiet_period().await;

    match state(&session).await {
        AutocompleteState::SubmittedFullText { query, results } => {
            assert_eq!(query, "pzza");
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].name, "Pizza Hut");
        }
        other => panic!("unexpected state {:?}", other),
    }

    type_text(&session, "sushi");
    quiet_period().await;
    let requests = provider.autocomplete_requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 2);
    assert_ne!(requests[0].session_token, requests[1].session_token);
}

#[actix::test]
async fn a_submit_with_no_matches_yields_an_empty_result_set() {
    let provider = Arc::new(FakeProvider::with_places(downtown_places()));
    let session = located_session(provider).await;

    session.autocomplete.do_send(SubmitQuery {
        text: "pizzaaa".to_string(),
    });
    quiet_period().await;

    assert_eq!(
        state(&session).await,
        AutocompleteState::SubmittedFullText {
            query: "pizzaaa".to_string(),
            results: Vec::new(),
        }
    );
}

#[actix::test]
async fn a_failed_fetch_clears_the_suggestions() {
    let provider = Arc::new(FakeProvider {
        autocomplete_error: Some(ProviderError::Transport {
            offline: true,
            message: "network down".into(),
        }),
        ..FakeProvider::with_places(downtown_places())
    });
    let session = located_session(provider.clone()).await;

    type_text(&session, "sushi");
    quiet_period().await;

    assert_eq!(provider.autocomplete_inputs(), vec!["sushi"]);
    assert_eq!(state(&session).await, AutocompleteState::Empty);
}
