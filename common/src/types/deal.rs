use crate::errors::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A deal posted against a restaurant, keyed by the restaurant's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub link: Option<String>,
    pub restaurant_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDeal {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub link: Option<String>,
    pub restaurant_id: String,
}

impl NewDeal {
    /// Trims text fields and checks the required ones.
    pub fn validate(self) -> Result<NewDeal, ValidationError> {
        let title = self.title.trim().to_string();
        let description = self.description.trim().to_string();
        let restaurant_id = self.restaurant_id.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if description.is_empty() {
            return Err(ValidationError::MissingField("description"));
        }
        if restaurant_id.is_empty() {
            return Err(ValidationError::MissingField("restaurant_id"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice);
        }
        let link = self
            .link
            .map(|link| link.trim().to_string())
            .filter(|link| !link.is_empty());
        Ok(NewDeal {
            title,
            description,
            price: self.price,
            link,
            restaurant_id,
        })
    }
}
