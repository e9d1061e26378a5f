//! Deterministic skies for navigation tests.

use std::collections::HashSet;

use jiff::Timestamp;

use crate::{
    error::SkyError,
    geodesy::{bearing, normalize_degrees},
    model::{CelestialObject, Horizontal, Position, Sighting},
    sky::{Sky, Visibility},
};

pub(crate) fn observation_time() -> Timestamp {
    "2024-06-21T22:00:00Z".parse().unwrap()
}

pub(crate) fn pos(latitude: f64, longitude: f64) -> Position {
    Position::new(latitude, longitude).unwrap()
}

struct PursuitObject {
    object: CelestialObject,
    offset: f64,
    altitude: f64,
    sets_north_of: Option<f64>,
}

/// A sky whose objects always sit a fixed angle off the bearing to a
/// target, wherever the observer stands.
pub(crate) struct PursuitSky {
    target: Position,
    objects: Vec<PursuitObject>,
}

impl PursuitSky {
    pub(crate) fn new(target: Position) -> Self {
        Self {
            target,
            objects: Vec::new(),
        }
    }

    /// Adds a star `offset` degrees clockwise of the target bearing.
    pub(crate) fn star(mut self, name: &str, offset: f64, altitude: f64) -> Self {
        self.objects.push(PursuitObject {
            object: CelestialObject::star(name, 0.0, 0.0, 1.0),
            offset,
            altitude,
            sets_north_of: None,
        });
        self
    }

    /// Adds a star that drops below the horizon north of `latitude`.
    pub(crate) fn setting_star(mut self, name: &str, offset: f64, latitude: f64) -> Self {
        self = self.star(name, offset, 30.0);
        if let Some(last) = self.objects.last_mut() {
            last.sets_north_of = Some(latitude);
        }
        self
    }

    fn locate(&self, entry: &PursuitObject, position: &Position) -> Horizontal {
        let altitude = match entry.sets_north_of {
            Some(latitude) if position.latitude > latitude => -1.0,
            _ => entry.altitude,
        };
        Horizontal {
            azimuth: normalize_degrees(bearing(position, &self.target) + entry.offset),
            altitude,
        }
    }
}

impl Sky for PursuitSky {
    fn visible_objects(
        &self,
        position: &Position,
        _time: Timestamp,
        excluded: &HashSet<String>,
        visibility: Visibility,
    ) -> Result<Vec<Sighting>, SkyError> {
        Ok(self
            .objects
            .iter()
            .filter(|entry| !excluded.contains(&entry.object.name))
            .filter_map(|entry| {
                let horizontal = self.locate(entry, position);
                visibility
                    .admits(entry.object.magnitude, horizontal.altitude)
                    .then(|| Sighting::observed(entry.object.clone(), horizontal, true))
            })
            .collect())
    }

    fn object_position(
        &self,
        object: &CelestialObject,
        position: &Position,
        _time: Timestamp,
    ) -> Result<Horizontal, SkyError> {
        self.objects
            .iter()
            .find(|entry| entry.object.name == object.name)
            .map(|entry| self.locate(entry, position))
            .ok_or_else(|| SkyError::UnknownObject(object.name.clone()))
    }
}

/// A sky driven by two plain functions.
pub(crate) struct ScriptedSky {
    pub(crate) candidates: fn(&Position, &HashSet<String>) -> Vec<Sighting>,
    pub(crate) locate: fn(&CelestialObject, &Position) -> Result<Horizontal, SkyError>,
}

impl Sky for ScriptedSky {
    fn visible_objects(
        &self,
        position: &Position,
        _time: Timestamp,
        excluded: &HashSet<String>,
        _visibility: Visibility,
    ) -> Result<Vec<Sighting>, SkyError> {
        Ok((self.candidates)(position, excluded))
    }

    fn object_position(
        &self,
        object: &CelestialObject,
        position: &Position,
        _time: Timestamp,
    ) -> Result<Horizontal, SkyError> {
        (self.locate)(object, position)
    }
}

/// A visible star at a fixed azimuth and altitude.
pub(crate) fn sighting(name: &str, azimuth: f64, altitude: f64) -> Sighting {
    Sighting::observed(
        CelestialObject::star(name, 0.0, 0.0, 1.0),
        Horizontal { azimuth, altitude },
        true,
    )
}
