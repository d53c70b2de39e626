use crate::constants::POSITION_ENV_VAR;
use crate::errors::LocationError;
use crate::types::coordinate::Coordinate;
use async_trait::async_trait;
use std::time::Duration;

/// One-shot position fix. A single attempt; callers decide what a failure
/// means, the source never retries.
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn acquire(&self) -> Result<Coordinate, LocationError>;
}

/// Bounds any source with `timeout`, reporting elapse as
/// [`LocationError::Timeout`].
pub async fn acquire_with_timeout(
    source: &dyn PositionSource,
    timeout: Duration,
) -> Result<Coordinate, LocationError> {
    tokio::time::timeout(timeout, source.acquire())
        .await
        .map_err(|_| LocationError::Timeout)?
}

/// A position known up front.
#[derive(Debug, Clone, Copy)]
pub struct FixedPositionSource {
    coordinate: Coordinate,
}

impl FixedPositionSource {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl PositionSource for FixedPositionSource {
    async fn acquire(&self) -> Result<Coordinate, LocationError> {
        if self.coordinate.is_valid() {
            Ok(self.coordinate)
        } else {
            Err(LocationError::Unknown)
        }
    }
}

/// Reads `"<lat>,<lng>"` from the `DISCOVERY_POSITION` environment variable.
#[derive(Debug, Clone, Default)]
pub struct EnvPositionSource;

impl EnvPositionSource {
    pub fn parse(value: &str) -> Result<Coordinate, LocationError> {
        let (lat, lng) = value.split_once(',').ok_or(LocationError::Unknown)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| LocationError::Unknown)?;
        let lng = lng.trim().parse::<f64>().map_err(|_| LocationError::Unknown)?;
        Some(Coordinate::new(lat, lng))
            .filter(Coordinate::is_valid)
            .ok_or(LocationError::Unknown)
    }
}

#[async_trait]
impl PositionSource for EnvPositionSource {
    async fn acquire(&self) -> Result<Coordinate, LocationError> {
        let value = std::env::var(POSITION_ENV_VAR).map_err(|_| LocationError::Unavailable)?;
        Self::parse(&value)
    }
}
