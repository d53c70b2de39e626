use actix::prelude::*;
use client::client_actors::ui_handler::UIHandler;
use client::messages::internal_messages::UIMessage;
use client::session::DiscoverySession;
use colored::Color;
use common::config::DiscoveryConfig;
use common::logger::Logger;
use common::messages::{
    GetAutocompleteState, InputChanged, SelectSuggestion, SubmitQuery, SubscribeAutocomplete,
    SubscribeNearby,
};
use common::persistence::{InMemoryBackend, PersistenceBackend};
use common::position::EnvPositionSource;
use common::provider::{FixturePlaceProvider, PlaceProvider};
use common::types::deal::NewDeal;
use common::types::search_status::{AutocompleteState, PositionStatus};
use std::env;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::ctrl_c;

const HELP: &str = "Type to get suggestions | :find <text> local search | :pick <n> select suggestion | \
:deal <title> | <description> | <price> post for selection | :deals | :quit";

#[actix::main]
async fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <places.json> [config.json]", args[0]);
        std::process::exit(1);
    }
    let logger = Logger::new("Discovery", Color::BrightGreen);

    let config = match args.get(2) {
        Some(path) => match DiscoveryConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                logger.error(e.to_string());
                std::process::exit(1);
            }
        },
        None => DiscoveryConfig::default(),
    };
    let provider: Arc<dyn PlaceProvider> = match FixturePlaceProvider::from_file(&args[1]) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            logger.error(format!("Could not load places: {}", e));
            std::process::exit(1);
        }
    };
    let backend: Arc<dyn PersistenceBackend> = Arc::new(InMemoryBackend::new());

    let ui = UIHandler::new().start();
    let mut session = DiscoverySession::start(config, provider, Some(backend.clone()));
    session.coordinator.do_send(SubscribeNearby {
        recipient: ui.clone().recipient(),
    });
    session.autocomplete.do_send(SubscribeAutocomplete {
        recipient: ui.clone().recipient(),
    });

    if let PositionStatus::Failed(error) = session.locate(&EnvPositionSource).await {
        ui.do_send(UIMessage::LocationFailed(error));
    }
    ui.do_send(UIMessage::ShowMessage(HELP.to_string()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = ctrl_c() => break,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !dispatch(&session, backend.as_ref(), &ui, &logger, line.trim_end()).await {
                    break;
                }
            }
        }
    }

    session.end();
    System::current().stop();
    Ok(())
}

/// Routes one line of input; `false` ends the session.
async fn dispatch(
    session: &DiscoverySession,
    backend: &dyn PersistenceBackend,
    ui: &Addr<UIHandler>,
    logger: &Logger,
    line: &str,
) -> bool {
    if line == ":quit" {
        return false;
    }
    if line == ":deals" {
        show_deals(session, backend, ui, logger).await;
        return true;
    }
    if let Some(fields) = line.strip_prefix(":deal ") {
        post_deal(session, backend, ui, logger, fields).await;
        return true;
    }
    if let Some(text) = line.strip_prefix(":find ") {
        session.autocomplete.do_send(SubmitQuery {
            text: text.to_string(),
        });
    } else if let Some(index) = line.strip_prefix(":pick ") {
        let state = match session.autocomplete.send(GetAutocompleteState).await {
            Ok(state) => state,
            Err(e) => {
                logger.error(format!("Autocomplete unavailable: {}", e));
                return true;
            }
        };
        let chosen = index
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| state.suggestions().get(i).cloned());
        match chosen {
            Some(suggestion) => session.autocomplete.do_send(SelectSuggestion {
                place_id: suggestion.place_id,
            }),
            None => ui.do_send(UIMessage::ShowMessage(
                "Invalid selection. Enter the number of a listed suggestion.".to_string(),
            )),
        }
    } else {
        session.autocomplete.do_send(InputChanged {
            text: line.to_string(),
        });
    }
    true
}

async fn selected_restaurant_id(session: &DiscoverySession, logger: &Logger) -> Option<String> {
    match session.autocomplete.send(GetAutocompleteState).await {
        Ok(AutocompleteState::Selected { restaurant }) => Some(restaurant.id),
        Ok(_) => None,
        Err(e) => {
            logger.error(format!("Autocomplete unavailable: {}", e));
            None
        }
    }
}

/// Deals for the selected restaurant, or every deal when nothing is selected.
async fn show_deals(session: &DiscoverySession, backend: &dyn PersistenceBackend, ui: &Addr<UIHandler>, logger: &Logger) {
    let deals = match selected_restaurant_id(session, logger).await {
        Some(id) => backend.deals_for_restaurant(&id).await,
        None => backend.recent_deals().await,
    };
    match deals {
        Ok(deals) if deals.is_empty() => ui.do_send(UIMessage::ShowMessage("No deals yet.".to_string())),
        Ok(deals) => {
            for deal in deals {
                ui.do_send(UIMessage::ShowMessage(format!(
                    "{} | ${:.2} | {} ({})",
                    deal.title,
                    deal.price,
                    deal.description,
                    deal.created_at.format("%Y-%m-%d %H:%M")
                )));
            }
        }
        Err(e) => logger.error(format!("Could not load deals: {}", e)),
    }
}

/// `<title> | <description> | <price>` against the selected restaurant.
async fn post_deal(
    session: &DiscoverySession,
    backend: &dyn PersistenceBackend,
    ui: &Addr<UIHandler>,
    logger: &Logger,
    fields: &str,
) {
    let Some(restaurant_id) = selected_restaurant_id(session, logger).await else {
        ui.do_send(UIMessage::ShowMessage(
            "Select a restaurant before posting a deal.".to_string(),
        ));
        return;
    };
    let parts: Vec<&str> = fields.splitn(3, '|').map(str::trim).collect();
    let [title, description, price] = parts.as_slice() else {
        ui.do_send(UIMessage::ShowMessage(
            "Usage: :deal <title> | <description> | <price>".to_string(),
        ));
        return;
    };
    let draft = NewDeal {
        title: title.to_string(),
        description: description.to_string(),
        price: price.parse().unwrap_or(f64::NAN),
        link: None,
        restaurant_id,
    };
    match backend.create_deal(draft).await {
        Ok(deal) => ui.do_send(UIMessage::ShowMessage(format!("Deal posted: {}", deal.title))),
        Err(e) => ui.do_send(UIMessage::ShowMessage(format!("Deal rejected: {}", e))),
    }
}
