use crate::types::coordinate::Coordinate;
use crate::types::search_status::NearbySnapshot;
use actix::{Message, Recipient};

/// Message carrying a resolved position fix to the nearby-search coordinator.
///
/// ## Purpose
/// Lets the coordinator leave `Idle`. A fix for a rounded key that was
/// already searched this session issues no provider call.
///
/// ## Contents
/// - `coordinate`: The fix, unrounded.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct PositionAcquired {
    pub coordinate: Coordinate,
}

/// Message requesting a copy of the coordinator's current restaurant set.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "NearbySnapshot")]
pub struct GetNearbyRestaurants;

/// Message registering a recipient for [`NearbyRestaurantsReady`].
#[derive(Message)]
#[rtype(result = "()")]
pub struct SubscribeNearby {
    pub recipient: Recipient<NearbyRestaurantsReady>,
}

/// Message published every time the coordinator reaches `Done`.
///
/// ## Contents
/// - `snapshot`: Restaurants (a copy), the key searched, cache provenance and
///   the provider error if the fetch failed.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct NearbyRestaurantsReady {
    pub snapshot: NearbySnapshot,
}
