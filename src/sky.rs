//! The sky provider: which objects are up, and where.
//!
//! Planning never computes astronomy itself. It asks a [`Sky`] for the
//! visible candidates at a position and for an object's horizontal
//! position after each step. Whatever catalog or ephemeris backs the
//! provider is its own business; missing capabilities surface as
//! [`SkyError`] values, not as global flags.

mod catalog;
mod horizontal;

use std::collections::HashSet;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

pub use catalog::{BRIGHT_STARS, CatalogSky};
pub use horizontal::{julian_date, local_sidereal_time_hours, to_horizontal};

use crate::{
    error::SkyError,
    model::{CelestialObject, Horizontal, Position, Sighting},
};

/// Thresholds an object must pass to count as visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    /// Objects must be strictly above this altitude, degrees.
    pub min_altitude: f64,

    /// Objects must be strictly brighter (lower) than this magnitude.
    pub max_magnitude: f64,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            min_altitude: 0.0,
            max_magnitude: 6.0,
        }
    }
}

impl Visibility {
    pub fn admits(&self, magnitude: f64, altitude: f64) -> bool {
        altitude > self.min_altitude && magnitude < self.max_magnitude
    }
}

/// A source of celestial positions.
///
/// Implementations must be deterministic and return candidates in a stable
/// order: selection breaks ties by that order.
pub trait Sky {
    /// Objects visible from `position` at `time`, with azimuth and altitude
    /// filled in, skipping any whose name is in `excluded`.
    fn visible_objects(
        &self,
        position: &Position,
        time: Timestamp,
        excluded: &HashSet<String>,
        visibility: Visibility,
    ) -> Result<Vec<Sighting>, SkyError>;

    /// Where `object` appears from `position` at `time`.
    fn object_position(
        &self,
        object: &CelestialObject,
        position: &Position,
        time: Timestamp,
    ) -> Result<Horizontal, SkyError>;
}

impl<S: Sky + ?Sized> Sky for &S {
    fn visible_objects(
        &self,
        position: &Position,
        time: Timestamp,
        excluded: &HashSet<String>,
        visibility: Visibility,
    ) -> Result<Vec<Sighting>, SkyError> {
        (**self).visible_objects(position, time, excluded, visibility)
    }

    fn object_position(
        &self,
        object: &CelestialObject,
        position: &Position,
        time: Timestamp,
    ) -> Result<Horizontal, SkyError> {
        (**self).object_position(object, position, time)
    }
}
