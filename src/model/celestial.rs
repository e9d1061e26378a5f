//! Celestial objects and what an observer sees of them.

use serde::{Deserialize, Serialize};

/// The classic navigational stars, plus Polaris.
///
/// "Alpha Centauri" is listed beside its navigational name, Rigil Kentaurus,
/// because catalogs commonly use either.
pub const NAVIGATIONAL_STARS: &[&str] = &[
    "Acamar",
    "Achernar",
    "Acrux",
    "Adhara",
    "Aldebaran",
    "Alioth",
    "Alkaid",
    "Alnair",
    "Alnilam",
    "Alphard",
    "Alphecca",
    "Alpheratz",
    "Altair",
    "Ankaa",
    "Antares",
    "Arcturus",
    "Atria",
    "Avior",
    "Bellatrix",
    "Betelgeuse",
    "Canopus",
    "Capella",
    "Deneb",
    "Denebola",
    "Diphda",
    "Dubhe",
    "Elnath",
    "Eltanin",
    "Enif",
    "Fomalhaut",
    "Gacrux",
    "Gienah",
    "Hadar",
    "Hamal",
    "Kaus Australis",
    "Kochab",
    "Markab",
    "Menkar",
    "Menkent",
    "Miaplacidus",
    "Mirfak",
    "Nunki",
    "Peacock",
    "Polaris",
    "Pollux",
    "Procyon",
    "Rasalhague",
    "Regulus",
    "Rigel",
    "Rigil Kentaurus",
    "Alpha Centauri",
    "Sabik",
    "Schedar",
    "Shaula",
    "Sirius",
    "Spica",
    "Suhail",
    "Vega",
    "Zubenelgenubi",
];

/// What kind of body an object is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Star,
    Planet,
    Moon,
    Sun,
}

impl ObjectKind {
    /// Sun, moon, and planets: bodies that need an ephemeris to locate.
    pub fn is_solar_system(self) -> bool {
        !matches!(self, Self::Star)
    }
}

/// A body on the celestial sphere, independent of any observer.
///
/// The name identifies the object within a route: once followed, a name is
/// never selected again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialObject {
    pub name: String,

    /// Right ascension in hours, [0, 24).
    pub right_ascension: f64,

    /// Declination in degrees, [-90, 90].
    pub declination: f64,

    /// Apparent magnitude. Lower is brighter.
    pub magnitude: f64,

    pub kind: ObjectKind,
}

impl CelestialObject {
    pub fn star(name: &str, right_ascension: f64, declination: f64, magnitude: f64) -> Self {
        Self {
            name: name.to_string(),
            right_ascension,
            declination,
            magnitude,
            kind: ObjectKind::Star,
        }
    }

    /// Planets, the sun, the moon, and the navigational stars.
    pub fn is_major(&self) -> bool {
        self.kind.is_solar_system() || NAVIGATIONAL_STARS.contains(&self.name.as_str())
    }
}

/// Where an object appears to an observer: compass azimuth and altitude
/// above the horizon, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Horizontal {
    /// [0, 360), 0 = North, clockwise.
    pub azimuth: f64,

    /// [-90, 90], positive above the horizon.
    pub altitude: f64,
}

/// An object as seen from one position at one time.
///
/// The observed fields are a snapshot, recomputed for every observer
/// position. They are never part of the object's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    #[serde(flatten)]
    pub object: CelestialObject,

    /// Missing when the provider could not place the object; such sightings
    /// are never selected.
    pub azimuth: Option<f64>,

    pub altitude: Option<f64>,

    pub is_visible: bool,
}

impl Sighting {
    /// A sighting with a known horizontal position.
    pub fn observed(object: CelestialObject, horizontal: Horizontal, is_visible: bool) -> Self {
        Self {
            object,
            azimuth: Some(horizontal.azimuth),
            altitude: Some(horizontal.altitude),
            is_visible,
        }
    }

    pub fn name(&self) -> &str {
        &self.object.name
    }

    /// The horizontal position, when both coordinates are known.
    pub fn horizontal(&self) -> Option<Horizontal> {
        Some(Horizontal {
            azimuth: self.azimuth?,
            altitude: self.altitude?,
        })
    }

    /// The same object seen from somewhere else.
    pub fn resighted(&self, horizontal: Horizontal, is_visible: bool) -> Self {
        Self::observed(self.object.clone(), horizontal, is_visible)
    }
}
