use std::time::Duration;

pub const SEARCH_RADIUS_METERS: f64 = 10_000.0;
pub const MAX_RESULT_COUNT: u32 = 20;
pub const RESTAURANT_CATEGORY: &str = "restaurant";

const DEBOUNCE_MILLIS: u64 = 300;
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(DEBOUNCE_MILLIS);
const POSITION_TIMEOUT_SECONDS: u64 = 10;
pub const POSITION_TIMEOUT: Duration = Duration::from_secs(POSITION_TIMEOUT_SECONDS);

pub const MAX_QUERY_CHARS: usize = 100;

/// Decimal places kept when deriving a proximity key (~110 m).
pub const PROXIMITY_DECIMALS: usize = 3;
pub const CACHE_KEY_PREFIX: &str = "restaurants_";

/// Prefix of a current-shape record's resource name, `places/<id>`.
pub const RESOURCE_NAME_PREFIX: &str = "places/";

/// Qualifier that marks a provider category tag as a cuisine.
pub const CUISINE_QUALIFIER: &str = "restaurant";
pub const NANOS_PER_UNIT: f64 = 1_000_000_000.0;

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub const DETAIL_FIELDS: [&str; 7] = [
    "id",
    "displayName",
    "formattedAddress",
    "location",
    "types",
    "rating",
    "priceRange",
];

pub const POSITION_ENV_VAR: &str = "DISCOVERY_POSITION";
pub const DEBUG_ENV_VAR: &str = "DISCOVERY_DEBUG";
pub const MAPS_PLACE_URL: &str = "https://www.google.com/maps/place/?q=place_id:";
