//! Equatorial to horizontal coordinates.
//!
//! Mean sidereal time from the linear GMST expression, which is good to
//! about a second over the centuries around J2000. Precession, nutation and
//! refraction are ignored.

use jiff::Timestamp;

use crate::{
    geodesy::{clamp_unit, normalize_degrees},
    model::{Horizontal, Position},
};

/// Julian date of the UNIX epoch.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian date of J2000.0 (2000-01-01T12:00:00 TT, taken as UT here).
const J2000_JD: f64 = 2_451_545.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Julian date of a timestamp.
#[allow(clippy::cast_precision_loss)]
pub fn julian_date(time: Timestamp) -> f64 {
    time.as_millisecond() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// Greenwich mean sidereal time, hours in [0, 24).
fn gmst_hours(jd: f64) -> f64 {
    let d = jd - J2000_JD;
    (18.697_374_558 + 24.065_709_824_419_08 * d).rem_euclid(24.0)
}

/// Local mean sidereal time at an east longitude, hours in [0, 24).
pub fn local_sidereal_time_hours(longitude_deg: f64, time: Timestamp) -> f64 {
    (gmst_hours(julian_date(time)) + longitude_deg / 15.0).rem_euclid(24.0)
}

/// Azimuth and altitude of a body at (`right_ascension` hours,
/// `declination` degrees) seen from `observer` at `time`.
pub fn to_horizontal(
    right_ascension: f64,
    declination: f64,
    observer: &Position,
    time: Timestamp,
) -> Horizontal {
    let lst = local_sidereal_time_hours(observer.longitude, time);
    let hour_angle = ((lst - right_ascension) * 15.0).to_radians();
    let lat = observer.latitude.to_radians();
    let dec = declination.to_radians();

    let sin_alt = clamp_unit(dec.sin() * lat.sin() + dec.cos() * lat.cos() * hour_angle.cos());
    let altitude = sin_alt.asin().to_degrees();

    let y = -dec.cos() * hour_angle.sin();
    let x = dec.sin() * lat.cos() - dec.cos() * lat.sin() * hour_angle.cos();
    let azimuth = normalize_degrees(y.atan2(x).to_degrees());

    Horizontal { azimuth, altitude }
}
