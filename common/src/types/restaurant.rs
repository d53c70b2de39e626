use crate::constants::MAPS_PLACE_URL;
use crate::types::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// Canonical restaurant record. Everything the pipeline caches, matches or
/// persists has this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Provider-assigned id, unique within a result set.
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub location: Coordinate,
    pub rating: Option<f64>,
    /// Title-cased cuisines; never an empty list.
    pub cuisine_tags: Option<Vec<String>>,
    /// `(low, high)` with `low <= high`.
    pub price_range: Option<(f64, f64)>,
}

impl Restaurant {
    pub fn maps_url(&self) -> String {
        format!("{}{}", MAPS_PLACE_URL, self.id)
    }

    pub fn address_label(&self) -> &str {
        self.address.as_deref().unwrap_or("Address not available")
    }

    pub fn cuisine_label(&self) -> String {
        match &self.cuisine_tags {
            Some(tags) if !tags.is_empty() => tags.join(", "),
            _ => "N/A".to_string(),
        }
    }

    pub fn rating_label(&self) -> String {
        self.rating
            .map(|rating| format!("★ {rating:.1}"))
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Restaurant {
        Restaurant {
            id: "abc123".into(),
            name: "Sushi Place".into(),
            address: None,
            location: Coordinate::new(1.0, 2.0),
            rating: Some(4.25),
            cuisine_tags: Some(vec!["Japanese".into(), "Sushi".into()]),
            price_range: Some((10.5, 20.0)),
        }
    }

    #[test]
    fn labels_fall_back_when_fields_are_absent() {
        let mut restaurant = sample();
        assert_eq!(restaurant.address_label(), "Address not available");
        assert_eq!(restaurant.cuisine_label(), "Japanese, Sushi");
        restaurant.cuisine_tags = None;
        restaurant.rating = None;
        assert_eq!(restaurant.cuisine_label(), "N/A");
        assert_eq!(restaurant.rating_label(), "N/A");
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["cuisineTags"][0], "Japanese");
        assert_eq!(json["priceRange"][0], 10.5);
        assert_eq!(json["location"]["lng"], 2.0);
    }

    #[test]
    fn maps_url_links_by_id() {
        assert!(sample().maps_url().ends_with("place_id:abc123"));
    }
}
