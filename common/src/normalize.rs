//! Raw provider record → canonical [`Restaurant`].
//!
//! Every function here is pure: the same raw record always yields the same
//! restaurant, so cached and freshly fetched records are interchangeable.

use crate::constants::{CUISINE_QUALIFIER, RESOURCE_NAME_PREFIX};
use crate::errors::NormalizationDrop;
use crate::logger::Logger;
use crate::types::coordinate::Coordinate;
use crate::types::raw_place::{RawPlace, RawPriceRange};
use crate::types::restaurant::Restaurant;
use crate::utils::title_case;
use std::collections::HashSet;

pub fn normalize(raw: &RawPlace) -> Result<Restaurant, NormalizationDrop> {
    let id = resolve_id(raw).ok_or(NormalizationDrop::MissingId)?.to_string();
    let location =
        resolve_location(raw).ok_or_else(|| NormalizationDrop::UnresolvableLocation(id.clone()))?;

    Ok(Restaurant {
        name: resolve_name(raw).unwrap_or_default().to_string(),
        address: resolve_address(raw).map(str::to_string),
        location,
        rating: raw.rating,
        cuisine_tags: raw.types.as_deref().and_then(cuisine_tags),
        price_range: raw.price_range.as_ref().and_then(price_range),
        id,
    })
}

/// Normalizes a whole provider response, absorbing per-record drops. The
/// first record wins when ids repeat.
pub fn normalize_all(raws: &[RawPlace], logger: &Logger) -> Vec<Restaurant> {
    let mut seen = HashSet::new();
    let mut restaurants = Vec::with_capacity(raws.len());
    for raw in raws {
        let outcome = normalize(raw).and_then(|restaurant| {
            if seen.insert(restaurant.id.clone()) {
                Ok(restaurant)
            } else {
                Err(NormalizationDrop::DuplicateId(restaurant.id))
            }
        });
        match outcome {
            Ok(restaurant) => restaurants.push(restaurant),
            Err(drop) => logger.debug(format!("Dropped raw place: {drop}")),
        }
    }
    restaurants
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// `id`, then legacy `place_id`, then the id inside a `places/<id>` resource
/// name.
pub fn resolve_id(raw: &RawPlace) -> Option<&str> {
    non_empty(raw.id.as_deref())
        .or_else(|| non_empty(raw.place_id.as_deref()))
        .or_else(|| non_empty(raw.name.as_deref()?.strip_prefix(RESOURCE_NAME_PREFIX)))
}

/// `displayName`, then a legacy `name` that is not a resource name.
pub fn resolve_name(raw: &RawPlace) -> Option<&str> {
    raw.display_name
        .as_ref()
        .map(|name| name.text())
        .or_else(|| {
            raw.name
                .as_deref()
                .filter(|name| !name.starts_with(RESOURCE_NAME_PREFIX))
        })
}

pub fn resolve_address(raw: &RawPlace) -> Option<&str> {
    raw.formatted_address
        .as_deref()
        .or(raw.vicinity.as_deref())
}

/// Unifies the provider's coordinate encodings into one [`Coordinate`].
/// `location` takes precedence over the legacy `geometry.location`.
pub fn resolve_location(raw: &RawPlace) -> Option<Coordinate> {
    let (lat, lng) = raw
        .location
        .or_else(|| raw.geometry.map(|geometry| geometry.location))?
        .lat_lng();
    Some(Coordinate::new(lat, lng)).filter(Coordinate::is_valid)
}

/// Keeps only cuisine tags (`italian_restaurant` → `Italian`).
pub fn cuisine_tags(types: &[String]) -> Option<Vec<String>> {
    let tags: Vec<String> = types
        .iter()
        .filter(|tag| tag.contains(CUISINE_QUALIFIER))
        .map(|tag| {
            let words = tag.replace(CUISINE_QUALIFIER, "").replace(['_', '-'], " ");
            title_case(&words)
        })
        .filter(|tag| !tag.is_empty())
        .collect();
    if tags.is_empty() { None } else { Some(tags) }
}

/// A missing end price means the range is open at the start price. Bounds
/// that arrive reversed are swapped.
pub fn price_range(range: &RawPriceRange) -> Option<(f64, f64)> {
    let low = range.start_price.as_ref()?.amount();
    let high = range.end_price.as_ref().map_or(low, |money| money.amount());
    if !low.is_finite() || !high.is_finite() {
        return None;
    }
    Some(if low <= high { (low, high) } else { (high, low) })
}
