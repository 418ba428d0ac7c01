//! Observation position value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed geographic position a forecast is requested for
///
/// No range validation is applied; the remote service is the authority on
/// which coordinates it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in degrees
    latitude: f64,
    /// Longitude in degrees
    longitude: f64,
    /// Altitude in meters above sea level
    altitude: f64,
}

impl Position {
    /// Create a new position
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Get the altitude
    #[must_use]
    pub const fn altitude(&self) -> f64 {
        self.altitude
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4}, {:.4} ({:.0} m)",
            self.latitude, self.longitude, self.altitude
        )
    }
}
