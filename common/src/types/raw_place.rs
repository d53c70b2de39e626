use crate::constants::NANOS_PER_UNIT;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, PickFirst, serde_as};

/// A place record exactly as the provider returns it. Carries the fields of
/// the current record shape (`id`, `displayName`, `formattedAddress`,
/// `location`) and of the legacy one (`place_id`, `name`, `vicinity`,
/// `geometry.location`) side by side; [`crate::normalize`] picks between them.
///
/// In the current shape `name` is the resource name `places/<id>`.
///
/// Coordinate and price fields that do not decode read as absent, so one
/// malformed record never fails the batch it arrived in.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlace {
    pub id: Option<String>,
    #[serde(rename = "place_id")]
    pub place_id: Option<String>,
    pub display_name: Option<DisplayName>,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub vicinity: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub location: Option<RawLocation>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
    pub types: Option<Vec<String>>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub price_range: Option<RawPriceRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayName {
    Text(String),
    Localized {
        text: String,
        #[serde(rename = "languageCode")]
        language_code: Option<String>,
    },
}

impl DisplayName {
    pub fn text(&self) -> &str {
        match self {
            DisplayName::Text(text) => text,
            DisplayName::Localized { text, .. } => text,
        }
    }
}

/// The coordinate encodings seen from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLocation {
    LatLng { lat: f64, lng: f64 },
    LatitudeLongitude { latitude: f64, longitude: f64 },
    Pair([f64; 2]),
}

impl RawLocation {
    pub fn lat_lng(&self) -> (f64, f64) {
        match *self {
            RawLocation::LatLng { lat, lng } => (lat, lng),
            RawLocation::LatitudeLongitude {
                latitude,
                longitude,
            } => (latitude, longitude),
            RawLocation::Pair([lat, lng]) => (lat, lng),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawGeometry {
    pub location: RawLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPriceRange {
    pub start_price: Option<Money>,
    pub end_price: Option<Money>,
}

/// Whole units plus a nano-unit fraction. `units` is an int64 and is often
/// encoded as a JSON string.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub currency_code: Option<String>,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub units: i64,
    #[serde(default)]
    pub nanos: i32,
}

impl Money {
    pub fn amount(&self) -> f64 {
        self.units as f64 + f64::from(self.nanos) / NANOS_PER_UNIT
    }
}
