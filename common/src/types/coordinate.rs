use crate::constants::{CACHE_KEY_PREFIX, PROXIMITY_DECIMALS};
use crate::utils::format_fixed;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A captured position. Never rounded for display or centering; rounding only
/// happens when deriving a [`ProximityKey`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and inside the lat/lng ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn proximity_key(&self) -> ProximityKey {
        ProximityKey(format!(
            "{}_{}",
            format_fixed(self.lat, PROXIMITY_DECIMALS),
            format_fixed(self.lng, PROXIMITY_DECIMALS)
        ))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Coordinate rounded to three decimals, `"<lat>_<lng>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProximityKey(String);

impl ProximityKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the session-store entry holding this bucket's restaurants.
    pub fn cache_key(&self) -> String {
        format!("{}{}", CACHE_KEY_PREFIX, self.0)
    }
}

impl fmt::Display for ProximityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
