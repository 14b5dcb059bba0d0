//! Moon zodiac sign from a low-order lunar longitude theory.
//!
//! Mean elements are referred to the 1990 January 0.0 epoch
//! (JD 2447891.5) and refined with the classic periodic terms: evection,
//! annual equation, a third correction, equation of the centre, a fourth
//! correction and variation.

use std::f64::consts::PI;

use chrono::{DateTime, Utc};

use crate::angles::{deg_to_rad, julian_date, normalize_radians, rad_to_deg};
use crate::types::{LunarDay, ZodiacSign};

const EPOCH_JD: f64 = 2_447_891.5;

const SUN_EPOCH_LONGITUDE: f64 = 4.876_507_578_297_35;
const SUN_PERIGEE_LONGITUDE: f64 = 4.935_239_984_568_769;
const TROPICAL_YEAR_DAYS: f64 = 365.242_191;
const EARTH_ECCENTRICITY: f64 = 0.016_713;

const MOON_MEAN_LONGITUDE: f64 = 318.351_648;
const MOON_MEAN_PERIGEE: f64 = 36.340_41;
const MOON_NODE_LONGITUDE: f64 = 318.510_107;
const MOON_INCLINATION: f64 = 5.145_396;

const MOON_DAILY_MOTION: f64 = 13.176_396_6;
const PERIGEE_DAILY_MOTION: f64 = 0.111_404_1;
const NODE_DAILY_MOTION: f64 = 0.052_953_9;

/// Geocentric ecliptic longitude of the moon at `instant`, radians in `[0, 2π)`.
pub fn moon_ecliptic_longitude(instant: DateTime<Utc>) -> f64 {
    let d = julian_date(instant) - EPOCH_JD;

    let sun_anomaly =
        (2.0 * PI / TROPICAL_YEAR_DAYS) * d + SUN_EPOCH_LONGITUDE - SUN_PERIGEE_LONGITUDE;
    let true_anomaly = sun_anomaly + (2.0 * EARTH_ECCENTRICITY) * sun_anomaly.sin();
    let sun_lon = normalize_radians(true_anomaly + SUN_PERIGEE_LONGITUDE);

    let l = deg_to_rad(MOON_DAILY_MOTION) * d + deg_to_rad(MOON_MEAN_LONGITUDE);
    let m_moon = l - deg_to_rad(PERIGEE_DAILY_MOTION) * d - deg_to_rad(MOON_MEAN_PERIGEE);
    let n = deg_to_rad(MOON_NODE_LONGITUDE) - deg_to_rad(NODE_DAILY_MOTION) * d;

    let evection = deg_to_rad(1.2739) * (2.0 * (l - sun_lon) - m_moon).sin();
    let annual_eq = deg_to_rad(0.1858) * sun_anomaly.sin();
    let a3 = deg_to_rad(0.37) * sun_anomaly.sin();
    let m_moon2 = m_moon + evection - annual_eq - a3;
    let centre = deg_to_rad(6.2886) * m_moon2.sin();
    let a4 = deg_to_rad(0.214) * (2.0 * m_moon2).sin();
    let l2 = l + evection + centre - annual_eq + a4;
    let variation = deg_to_rad(0.6583) * (2.0 * (l2 - sun_lon)).sin();
    let l3 = l2 + variation;
    let n2 = n - deg_to_rad(0.16) * sun_anomaly.sin();

    let inclination = deg_to_rad(MOON_INCLINATION);
    normalize_radians(
        n2 + ((l3 - n2).sin() * inclination.cos()).atan2((l3 - n2).cos()),
    )
}

/// Sign index for an ecliptic longitude in degrees.
///
/// The quotient by 30° is floored, and a negative floored quotient is then
/// ceiled before the Euclidean reduction into `0..12`.
pub fn sign_index(longitude_deg: f64) -> usize {
    let quotient = (longitude_deg / 30.0).floor();
    let index = if quotient < 0.0 {
        quotient.ceil()
    } else {
        quotient.floor()
    };
    (index as i64).rem_euclid(12) as usize
}

pub fn zodiac_at(instant: DateTime<Utc>) -> ZodiacSign {
    ZodiacSign::from_index(sign_index(rad_to_deg(moon_ecliptic_longitude(instant))))
}

/// Zodiac sign at the end of the lunar day numbered `day_number`, or of the
/// first window when no number is given or none matches.
pub fn moon_zodiac(days: &[LunarDay], day_number: Option<u32>) -> Option<ZodiacSign> {
    let target = day_number
        .and_then(|number| days.iter().find(|day| day.number == number))
        .or_else(|| days.first())?;
    Some(zodiac_at(target.end))
}
