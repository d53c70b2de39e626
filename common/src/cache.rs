use crate::errors::CacheError;
use crate::logger::Logger;
use crate::types::coordinate::Coordinate;
use crate::types::restaurant::Restaurant;
use colored::Color;
use std::collections::HashMap;

/// Session-scoped string key/value store. Everything in it is dropped when
/// the browsing session ends.
pub trait SessionStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: String);
    fn remove_item(&mut self, key: &str);
    fn clear(&mut self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    items: HashMap<String, String>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.items.insert(key.to_string(), value);
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// Proximity-keyed nearby-search results, persisted in the session store as
/// `restaurants_<lat.3f>_<lng.3f>` → JSON array of [`Restaurant`].
///
/// Lookups need an exact rounded-key match. Entries never expire on their
/// own; they live until [`ResultCache::clear`] at session end.
pub struct ResultCache {
    store: Box<dyn SessionStore>,
    logger: Logger,
}

impl ResultCache {
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self {
            store,
            logger: Logger::new("Result Cache", Color::Cyan),
        }
    }

    /// A fresh copy of the cached list, or `None` on a miss. Unreadable
    /// entries count as misses.
    pub fn get(&self, coordinate: &Coordinate) -> Option<Vec<Restaurant>> {
        let key = coordinate.proximity_key().cache_key();
        let raw = self.store.get_item(&key)?;
        match serde_json::from_str::<Vec<Restaurant>>(&raw) {
            Ok(restaurants) => {
                self.logger
                    .debug(format!("Hit for {} ({} restaurants)", key, restaurants.len()));
                Some(restaurants)
            }
            Err(e) => {
                self.logger
                    .warn(format!("Ignoring unreadable cache entry {}: {}", key, e));
                None
            }
        }
    }

    /// Overwrites whatever is stored for the coordinate's rounded key.
    pub fn put(&mut self, coordinate: &Coordinate, restaurants: &[Restaurant]) -> Result<(), CacheError> {
        let key = coordinate.proximity_key().cache_key();
        let value = serde_json::to_string(restaurants).map_err(|source| CacheError::Serialize {
            key: key.clone(),
            source,
        })?;
        self.store.set_item(&key, value);
        self.logger
            .debug(format!("Stored {} restaurants under {}", restaurants.len(), key));
        Ok(())
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.get(coordinate).is_some()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }
}
