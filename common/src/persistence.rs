use crate::errors::PersistenceError;
use crate::types::deal::{Deal, NewDeal};
use crate::types::restaurant::Restaurant;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Backend for normalized restaurants and the deals posted against them.
/// Only the restaurant `id` key is relied on.
#[async_trait]
pub trait PersistenceBackend: Send + Sync {
    async fn upsert_restaurants(&self, restaurants: &[Restaurant]) -> Result<usize, PersistenceError>;

    async fn create_deal(&self, deal: NewDeal) -> Result<Deal, PersistenceError>;

    async fn deals_for_restaurant(&self, restaurant_id: &str) -> Result<Vec<Deal>, PersistenceError>;

    /// All deals, newest first.
    async fn recent_deals(&self) -> Result<Vec<Deal>, PersistenceError>;
}

#[derive(Debug, Default)]
pub struct InMemoryBackend {
    restaurants: RwLock<HashMap<String, Restaurant>>,
    deals: RwLock<Vec<Deal>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn restaurant(&self, id: &str) -> Option<Restaurant> {
        self.restaurants.read().await.get(id).cloned()
    }
}

#[async_trait]
impl PersistenceBackend for InMemoryBackend {
    async fn upsert_restaurants(&self, restaurants: &[Restaurant]) -> Result<usize, PersistenceError> {
        let mut rows = self.restaurants.write().await;
        for restaurant in restaurants {
            rows.insert(restaurant.id.clone(), restaurant.clone());
        }
        Ok(restaurants.len())
    }

    async fn create_deal(&self, deal: NewDeal) -> Result<Deal, PersistenceError> {
        let deal = deal.validate()?;
        if !self.restaurants.read().await.contains_key(&deal.restaurant_id) {
            return Err(PersistenceError::UnknownRestaurant(deal.restaurant_id));
        }
        let stored = Deal {
            id: Uuid::new_v4(),
            title: deal.title,
            description: deal.description,
            price: deal.price,
            link: deal.link,
            restaurant_id: deal.restaurant_id,
            created_at: Utc::now(),
        };
        self.deals.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn deals_for_restaurant(&self, restaurant_id: &str) -> Result<Vec<Deal>, PersistenceError> {
        let mut deals: Vec<Deal> = self
            .deals
            .read()
            .await
            .iter()
            .filter(|deal| deal.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        deals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(deals)
    }

    async fn recent_deals(&self) -> Result<Vec<Deal>, PersistenceError> {
        let mut deals = self.deals.read().await.clone();
        deals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(deals)
    }
}
