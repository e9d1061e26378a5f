//! Geographic positions on a spherical Earth.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::PositionError;

/// A point on Earth: degrees of latitude and longitude, meters of altitude.
///
/// Altitude is carried along but never used by the geodesy, which treats
/// the Earth as a sphere at sea level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude: f64,
}

impl Position {
    /// Creates a validated sea-level position.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, PositionError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(PositionError::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(PositionError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
            altitude: 0.0,
        })
    }

    /// Sets the altitude in meters above sea level.
    pub fn with_altitude(mut self, altitude: f64) -> Result<Self, PositionError> {
        if !(-500.0..=9000.0).contains(&altitude) {
            return Err(PositionError::Altitude(altitude));
        }
        self.altitude = altitude;
        Ok(self)
    }

    /// Creates a position without validation.
    ///
    /// Used by the geodesy, whose outputs are in range by construction.
    pub(crate) const fn new_unchecked(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Parses `lat,lon` or `lat,lon,alt`. Whitespace around parts is ignored.
impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let parse = |part: &str| {
            part.parse::<f64>()
                .map_err(|_| PositionError::Malformed(s.to_string()))
        };

        match parts.as_slice() {
            [lat, lon] => Self::new(parse(lat)?, parse(lon)?),
            [lat, lon, alt] => Self::new(parse(lat)?, parse(lon)?)?.with_altitude(parse(alt)?),
            _ => Err(PositionError::Malformed(s.to_string())),
        }
    }
}
