//! Position providers available without location hardware
//!
//! A terminal has no geolocation API, so the position is either configured
//! up front or reported as unavailable.

use std::sync::Arc;

use async_trait::async_trait;
use shiftline_core::PositionProvider;
use shiftline_domain::constants::MSG_GEOLOCATION_UNSUPPORTED;
use shiftline_domain::{Position, PositionConfig, Result, ShiftlineError};
use tracing::debug;

/// Always reports the same configured position.
#[derive(Debug, Clone, Copy)]
pub struct StaticPositionProvider {
    position: Position,
}

impl StaticPositionProvider {
    /// Provider that always reports `position`
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

#[async_trait]
impl PositionProvider for StaticPositionProvider {
    async fn current_position(&self) -> Result<Position> {
        debug!(position = %self.position, "using configured position");
        Ok(self.position)
    }
}

/// Fails every request; used when no position is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailablePositionProvider;

#[async_trait]
impl PositionProvider for UnavailablePositionProvider {
    async fn current_position(&self) -> Result<Position> {
        Err(ShiftlineError::PositionUnavailable(MSG_GEOLOCATION_UNSUPPORTED.to_string()))
    }
}

/// Static provider when both coordinates are configured, otherwise the
/// unavailable one.
pub fn from_config(config: &PositionConfig) -> Arc<dyn PositionProvider> {
    match config.position() {
        Some(position) => Arc::new(StaticPositionProvider::new(position)),
        None => Arc::new(UnavailablePositionProvider),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn configured_position_is_reported() {
        let config = PositionConfig { latitude: Some(40.7), longitude: Some(-74.0), accuracy: 8.0 };
        let position = from_config(&config).current_position().await.unwrap();
        assert_eq!(position, Position::new(40.7, -74.0, 8.0));
    }

    #[tokio::test]
    async fn missing_coordinates_mean_unavailable() {
        let config = PositionConfig { latitude: Some(40.7), ..PositionConfig::default() };
        let err = from_config(&config).current_position().await.unwrap_err();
        assert_eq!(
            err,
            ShiftlineError::PositionUnavailable(
                "Geolocation is not supported on this platform".into()
            )
        );
    }
}
