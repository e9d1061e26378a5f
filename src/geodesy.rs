//! Spherical-Earth geodesy: bearings, distances, and projections.
//!
//! Every formula treats the Earth as a sphere of radius [`EARTH_RADIUS_KM`].
//! Angles in and out are degrees; distances are kilometers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Position;

/// Mean Earth radius, km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Upper bound on the target-reached cutoff, km.
pub const MAX_TARGET_REACHED_CUTOFF_KM: f64 = 5.0;

/// Share of the direct distance used as the target-reached cutoff.
pub const TARGET_REACHED_CUTOFF_FRACTION: f64 = 0.05;

/// Initial compass bearing of the great circle from `from` to `to`, in [0, 360).
pub fn bearing(from: &Position, to: &Position) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let x = delta_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    normalize_degrees(x.atan2(y).to_degrees())
}

/// Haversine great-circle distance, km. Ignores altitude.
pub fn distance(a: &Position, b: &Position) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * clamp_unit(h.sqrt()).asin();

    EARTH_RADIUS_KM * c
}

/// Where a traveler ends up after `distance_km` along `bearing_deg` from `position`.
///
/// Longitude is normalized to [-180, 180). Altitude is copied through.
pub fn destination(position: &Position, bearing_deg: f64, distance_km: f64) -> Position {
    let lat1 = position.latitude.to_radians();
    let lon1 = position.longitude.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;

    let lat2 = clamp_unit(lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    Position::new_unchecked(
        lat2.to_degrees(),
        normalize_longitude(lon2.to_degrees()),
        position.altitude,
    )
}

/// Shortest separation of two angles on the circle, in [0, 180].
pub fn angular_gap(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

/// Distance under which a route of the given direct length counts as arrived.
///
/// Five percent of the direct distance, never more than 5 km.
pub fn target_reached_cutoff(direct_distance_km: f64) -> f64 {
    (direct_distance_km * TARGET_REACHED_CUTOFF_FRACTION).min(MAX_TARGET_REACHED_CUTOFF_KM)
}

/// True when `a` and `b` are strictly closer than `tolerance_km`.
pub fn positions_equal(a: &Position, b: &Position, tolerance_km: f64) -> bool {
    distance(a, b) < tolerance_km
}

/// Eight-point compass rose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinal {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Cardinal {
    const ROSE: [Self; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// The nearest 45° bucket. Exact half-way bearings round to the even bucket.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_bearing(bearing_deg: f64) -> Self {
        let bucket = (normalize_degrees(bearing_deg) / 45.0).round_ties_even() as usize;
        Self::ROSE[bucket % 8]
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Answer to a compass-only query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub bearing: f64,
    pub cardinal_direction: Cardinal,
}

/// Bearing from `from` to `to`, with its cardinal direction.
pub fn direction(from: &Position, to: &Position) -> Direction {
    let bearing = bearing(from, to);
    Direction {
        bearing,
        cardinal_direction: Cardinal::from_bearing(bearing),
    }
}

pub(crate) fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

fn normalize_longitude(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Clamp an inverse-trig argument into [-1, 1].
pub(crate) fn clamp_unit(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}
