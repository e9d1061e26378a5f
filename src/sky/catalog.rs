//! Built-in sky: the fifty brightest stars, located by sidereal time.

use std::collections::HashSet;

use jiff::Timestamp;
use tracing::debug;

use super::{Sky, Visibility, horizontal::to_horizontal};
use crate::{
    error::SkyError,
    model::{CelestialObject, Horizontal, Position, Sighting},
};

/// Name, right ascension (hours), declination (degrees), magnitude.
pub const BRIGHT_STARS: &[(&str, f64, f64, f64)] = &[
    ("Sirius", 6.7525, -16.7161, -1.46),
    ("Canopus", 6.3992, -52.6956, -0.74),
    ("Arcturus", 14.2611, 19.1875, -0.05),
    ("Alpha Centauri", 14.6608, -60.8333, -0.01),
    ("Vega", 18.6156, 38.7836, 0.03),
    ("Capella", 5.2781, 46.0067, 0.08),
    ("Rigel", 5.2422, -8.2017, 0.13),
    ("Procyon", 7.6553, 5.2250, 0.38),
    ("Achernar", 1.6286, -57.2367, 0.46),
    ("Betelgeuse", 5.9192, 7.4071, 0.50),
    ("Hadar", 14.0637, -60.3731, 0.61),
    ("Altair", 19.8464, 8.8683, 0.77),
    ("Acrux", 12.4433, -63.0990, 0.77),
    ("Aldebaran", 4.5987, 16.5092, 0.85),
    ("Antares", 16.4901, -26.4320, 0.96),
    ("Spica", 13.4199, -11.1614, 0.98),
    ("Pollux", 7.7553, 28.0262, 1.14),
    ("Fomalhaut", 22.9609, -29.6222, 1.16),
    ("Deneb", 20.6905, 45.2803, 1.25),
    ("Mimosa", 12.7954, -59.6884, 1.25),
    ("Regulus", 10.1396, 11.9672, 1.36),
    ("Adhara", 6.9771, -28.9721, 1.50),
    ("Castor", 7.5766, 31.8886, 1.58),
    ("Gacrux", 12.5197, -57.1133, 1.64),
    ("Bellatrix", 5.4189, 6.3497, 1.64),
    ("Elnath", 5.4382, 28.6074, 1.65),
    ("Miaplacidus", 9.2200, -69.7172, 1.68),
    ("Alnilam", 5.6036, -1.2019, 1.69),
    ("Alnair", 22.1372, -46.9608, 1.74),
    ("Alnitak", 5.6793, -1.9426, 1.74),
    ("Alioth", 12.9006, 55.9598, 1.77),
    ("Dubhe", 11.0621, 61.7510, 1.79),
    ("Mirfak", 3.4053, 49.8612, 1.80),
    ("Wezen", 7.1399, -26.3932, 1.83),
    ("Sargas", 17.5606, -42.9979, 1.84),
    ("Kaus Australis", 18.4020, -34.3846, 1.85),
    ("Avior", 8.3752, -59.5095, 1.86),
    ("Alkaid", 13.7923, 49.3133, 1.86),
    ("Menkalinan", 5.9924, 44.9474, 1.90),
    ("Atria", 16.8111, -69.0277, 1.91),
    ("Alhena", 6.6285, 16.3992, 1.93),
    ("Peacock", 20.4275, -56.7351, 1.94),
    ("Polaris", 2.5303, 89.2641, 1.97),
    ("Mirzam", 6.3780, -17.9725, 1.98),
    ("Alphard", 9.4598, -8.6586, 1.99),
    ("Hamal", 2.1195, 23.4624, 2.01),
    ("Algieba", 10.3328, 19.8415, 2.01),
    ("Diphda", 0.7260, -17.9866, 2.04),
    ("Nunki", 18.9218, -26.2963, 2.05),
    ("Menkent", 14.0608, -36.3700, 2.06),
];

/// A sky of fixed-position objects.
///
/// Stars are located from their catalog coordinates. Sun, moon, and planets
/// move against the stars and need an ephemeris this provider does not
/// have; asking for one yields [`SkyError::EphemerisUnavailable`], and
/// [`Sky::visible_objects`] leaves them out.
#[derive(Debug, Clone)]
pub struct CatalogSky {
    objects: Vec<CelestialObject>,
}

impl Default for CatalogSky {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogSky {
    /// The bright-star catalog, in catalog order.
    pub fn new() -> Self {
        let objects = BRIGHT_STARS
            .iter()
            .map(|&(name, ra, dec, mag)| CelestialObject::star(name, ra, dec, mag))
            .collect();
        Self { objects }
    }

    /// A sky over the given objects, reported in the given order.
    pub fn with_objects(objects: Vec<CelestialObject>) -> Self {
        Self { objects }
    }

    pub fn objects(&self) -> &[CelestialObject] {
        &self.objects
    }
}

impl Sky for CatalogSky {
    fn visible_objects(
        &self,
        position: &Position,
        time: Timestamp,
        excluded: &HashSet<String>,
        visibility: Visibility,
    ) -> Result<Vec<Sighting>, SkyError> {
        let mut visible = Vec::new();
        for object in &self.objects {
            if excluded.contains(&object.name) {
                continue;
            }
            let horizontal = match self.object_position(object, position, time) {
                Ok(horizontal) => horizontal,
                Err(SkyError::EphemerisUnavailable(name)) => {
                    debug!(object = %name, "no ephemeris, skipping");
                    continue;
                }
                Err(err) => return Err(err),
            };
            if visibility.admits(object.magnitude, horizontal.altitude) {
                visible.push(Sighting::observed(object.clone(), horizontal, true));
            }
        }
        Ok(visible)
    }

    fn object_position(
        &self,
        object: &CelestialObject,
        position: &Position,
        time: Timestamp,
    ) -> Result<Horizontal, SkyError> {
        if object.kind.is_solar_system() {
            return Err(SkyError::EphemerisUnavailable(object.name.clone()));
        }
        Ok(to_horizontal(
            object.right_ascension,
            object.declination,
            position,
            time,
        ))
    }
}
