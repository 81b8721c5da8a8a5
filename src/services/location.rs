use thiserror::Error;

use crate::models::Position;

/// Errors from the geolocation provider
///
/// Surfaced to callers as a typed failure; the engine never falls back to a
/// fixed position.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    Denied,

    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the requester's current position on demand
pub trait LocationProvider: Send + Sync {
    fn current_position(&self) -> Result<Position, LocationError>;
}

/// Provider pinned to a fixed position, for the demo binary and tests
#[derive(Debug, Clone, Copy)]
pub struct StaticLocation(pub Position);

impl LocationProvider for StaticLocation {
    fn current_position(&self) -> Result<Position, LocationError> {
        Ok(self.0)
    }
}

/// Provider that always fails, for exercising the denied path
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocation;

impl LocationProvider for DeniedLocation {
    fn current_position(&self) -> Result<Position, LocationError> {
        Err(LocationError::Denied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_location_returns_position() {
        let provider = StaticLocation(Position::new(37.7749, -122.4194));
        let pos = provider.current_position().unwrap();
        assert_eq!(pos.latitude, 37.7749);
    }

    #[test]
    fn test_denied_location_fails() {
        let provider = DeniedLocation;
        assert!(matches!(
            provider.current_position(),
            Err(LocationError::Denied)
        ));
    }
}
