//! Astronomical primitives the lunar day pipeline depends on.
//!
//! [`EphemerisOracle`] is the seam: the pipeline only ever asks for new
//! moon searches, per-day moonrise/moonset and illumination. The bundled
//! [`AnalyticEphemeris`] answers with low-precision closed-form models;
//! tests substitute deterministic tables.

use chrono::{DateTime, Utc};

use crate::angles::{
    days_since_j2000, deg_to_rad, hours_later, instant_from_julian, julian_date,
};
use crate::types::{MoonIllumination, MoonTimes, PhaseHunt};

pub trait EphemerisOracle {
    /// New moons around `instant`.
    fn phase_hunt(&self, instant: DateTime<Utc>) -> PhaseHunt;

    /// Moonrise and moonset within the 24 hours starting at `day_start`.
    fn moon_times(&self, day_start: DateTime<Utc>, latitude: f64, longitude: f64) -> MoonTimes;

    fn moon_illumination(&self, instant: DateTime<Utc>) -> MoonIllumination;
}

impl<E: EphemerisOracle + ?Sized> EphemerisOracle for &E {
    fn phase_hunt(&self, instant: DateTime<Utc>) -> PhaseHunt {
        (**self).phase_hunt(instant)
    }

    fn moon_times(&self, day_start: DateTime<Utc>, latitude: f64, longitude: f64) -> MoonTimes {
        (**self).moon_times(day_start, latitude, longitude)
    }

    fn moon_illumination(&self, instant: DateTime<Utc>) -> MoonIllumination {
        (**self).moon_illumination(instant)
    }
}

pub const SYNODIC_MONTH: f64 = 29.530_588_68;
/// Julian date of the mean new moon of lunation 0 (1900 January).
const LUNATION_EPOCH_JD: f64 = 2_415_020.759_33;
/// Earth's obliquity, degrees.
const OBLIQUITY: f64 = 23.4397;
/// Apparent horizon for the moon's upper limb, degrees.
const MOON_HORIZON: f64 = 0.133;
const SUN_DISTANCE_KM: f64 = 149_598_000.0;

/// Closed-form sun/moon model with no external data.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }
}

impl EphemerisOracle for AnalyticEphemeris {
    fn phase_hunt(&self, instant: DateTime<Utc>) -> PhaseHunt {
        let jd = julian_date(instant);
        let k = bracketing_lunation(jd);
        PhaseHunt {
            new_moon_before: instant_from_julian(true_new_moon(k)),
            new_moon_after: instant_from_julian(true_new_moon(k + 1.0)),
        }
    }

    fn moon_times(&self, day_start: DateTime<Utc>, latitude: f64, longitude: f64) -> MoonTimes {
        moon_times(day_start, latitude, longitude)
    }

    fn moon_illumination(&self, instant: DateTime<Utc>) -> MoonIllumination {
        moon_illumination(instant)
    }
}

fn dsin(deg: f64) -> f64 {
    deg_to_rad(deg).sin()
}

/// Julian date of the mean new moon of lunation `k`.
pub fn mean_new_moon(k: f64) -> f64 {
    let t = k / 1236.85;
    let t2 = t * t;
    LUNATION_EPOCH_JD + SYNODIC_MONTH * k + 1.178e-4 * t2 - 1.55e-7 * t2 * t
        + 3.3e-4 * dsin(166.56 + 132.87 * t - 0.009173 * t2)
}

/// Lunation number `k` with `mean_new_moon(k) <= jd < mean_new_moon(k + 1)`.
pub fn bracketing_lunation(jd: f64) -> f64 {
    let mut k = ((jd - LUNATION_EPOCH_JD) / SYNODIC_MONTH).floor();
    while mean_new_moon(k) > jd {
        k -= 1.0;
    }
    while mean_new_moon(k + 1.0) <= jd {
        k += 1.0;
    }
    k
}

/// Julian date of the true new moon of lunation `k`.
pub fn true_new_moon(k: f64) -> f64 {
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let m = 359.2242 + 29.105_356_08 * k - 3.33e-5 * t2 - 3.47e-6 * t3;
    let mprime = 306.0253 + 385.816_918_06 * k + 0.010_730_6 * t2 + 1.236e-5 * t3;
    let f = 21.2964 + 390.670_506_46 * k - 0.001_652_8 * t2 - 2.39e-6 * t3;

    mean_new_moon(k)
        + (0.1734 - 3.93e-4 * t) * dsin(m)
        + 0.0021 * dsin(2.0 * m)
        - 0.4068 * dsin(mprime)
        + 0.0161 * dsin(2.0 * mprime)
        - 0.0004 * dsin(3.0 * mprime)
        + 0.0104 * dsin(2.0 * f)
        - 0.0051 * dsin(m + mprime)
        - 0.0074 * dsin(m - mprime)
        + 0.0004 * dsin(2.0 * f + m)
        - 0.0004 * dsin(2.0 * f - m)
        - 0.0006 * dsin(2.0 * f + mprime)
        + 0.0010 * dsin(2.0 * f - mprime)
        + 0.0005 * dsin(m + 2.0 * mprime)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoords {
    pub right_ascension: f64,
    pub declination: f64,
    /// Kilometres; zero for the sun.
    pub distance: f64,
}

fn right_ascension(l: f64, b: f64) -> f64 {
    let e = deg_to_rad(OBLIQUITY);
    (l.sin() * e.cos() - b.tan() * e.sin()).atan2(l.cos())
}

fn declination(l: f64, b: f64) -> f64 {
    let e = deg_to_rad(OBLIQUITY);
    (b.sin() * e.cos() + b.cos() * e.sin() * l.sin()).asin()
}

fn sidereal_time(d: f64, lw: f64) -> f64 {
    deg_to_rad(280.16 + 360.985_623_5 * d) - lw
}

fn altitude(hour_angle: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * hour_angle.cos()).asin()
}

fn astro_refraction(h: f64) -> f64 {
    let h = h.max(0.0);
    0.000_296_7 / (h + 0.003_125_36 / (h + 0.089_011_79)).tan()
}

pub fn sun_coords(d: f64) -> EquatorialCoords {
    let m = deg_to_rad(357.5291 + 0.985_600_28 * d);
    let c = deg_to_rad(1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    let l = m + c + deg_to_rad(102.9372) + std::f64::consts::PI;
    EquatorialCoords {
        right_ascension: right_ascension(l, 0.0),
        declination: declination(l, 0.0),
        distance: 0.0,
    }
}

pub fn moon_coords(d: f64) -> EquatorialCoords {
    let l0 = deg_to_rad(218.316 + 13.176_396 * d);
    let m = deg_to_rad(134.963 + 13.064_993 * d);
    let f = deg_to_rad(93.272 + 13.229_350 * d);
    let l = l0 + deg_to_rad(6.289) * m.sin();
    let b = deg_to_rad(5.128) * f.sin();
    EquatorialCoords {
        right_ascension: right_ascension(l, b),
        declination: declination(l, b),
        distance: 385_001.0 - 20_905.0 * m.cos(),
    }
}

/// Apparent altitude of the moon in radians, refraction included.
pub fn moon_altitude(instant: DateTime<Utc>, latitude: f64, longitude: f64) -> f64 {
    let lw = deg_to_rad(-longitude);
    let phi = deg_to_rad(latitude);
    let d = days_since_j2000(instant);
    let c = moon_coords(d);
    let h = altitude(sidereal_time(d, lw) - c.right_ascension, phi, c.declination);
    h + astro_refraction(h)
}

/// Scans 24 hours from `day_start` in 2-hour steps, fitting a parabola
/// through three altitude samples per step to locate horizon crossings.
pub fn moon_times(day_start: DateTime<Utc>, latitude: f64, longitude: f64) -> MoonTimes {
    let hc = deg_to_rad(MOON_HORIZON);
    let alt = |hours: f64| moon_altitude(hours_later(day_start, hours), latitude, longitude) - hc;

    let mut h0 = alt(0.0);
    let mut rise: Option<f64> = None;
    let mut set: Option<f64> = None;
    let mut ye = 0.0;

    for i in (1..=23).step_by(2) {
        let i = i as f64;
        let h1 = alt(i);
        let h2 = alt(i + 1.0);

        let a = (h0 + h2) / 2.0 - h1;
        let b = (h2 - h0) / 2.0;
        let xe = -b / (2.0 * a);
        ye = (a * xe + b) * xe + h1;
        let d = b * b - 4.0 * a * h1;

        let mut roots = 0;
        let mut x1 = 0.0;
        let mut x2 = 0.0;
        if d >= 0.0 {
            let dx = d.sqrt() / (a.abs() * 2.0);
            x1 = xe - dx;
            x2 = xe + dx;
            if x1.abs() <= 1.0 {
                roots += 1;
            }
            if x2.abs() <= 1.0 {
                roots += 1;
            }
            if x1 < -1.0 {
                x1 = x2;
            }
        }

        match roots {
            1 if h0 < 0.0 => rise = Some(i + x1),
            1 => set = Some(i + x1),
            2 => {
                rise = Some(i + if ye < 0.0 { x2 } else { x1 });
                set = Some(i + if ye < 0.0 { x1 } else { x2 });
            }
            _ => {}
        }

        if rise.is_some() && set.is_some() {
            break;
        }
        h0 = h2;
    }

    let neither = rise.is_none() && set.is_none();
    MoonTimes {
        rise: rise.map(|h| hours_later(day_start, h)),
        set: set.map(|h| hours_later(day_start, h)),
        always_up: neither && ye > 0.0,
        always_down: neither && !(ye > 0.0),
    }
}

pub fn moon_illumination(instant: DateTime<Utc>) -> MoonIllumination {
    let d = days_since_j2000(instant);
    let s = sun_coords(d);
    let m = moon_coords(d);
    let dra = s.right_ascension - m.right_ascension;

    let phi = (s.declination.sin() * m.declination.sin()
        + s.declination.cos() * m.declination.cos() * dra.cos())
    .acos();
    let inc = (SUN_DISTANCE_KM * phi.sin()).atan2(m.distance - SUN_DISTANCE_KM * phi.cos());
    let angle = (s.declination.cos() * dra.sin()).atan2(
        s.declination.sin() * m.declination.cos()
            - s.declination.cos() * m.declination.sin() * dra.cos(),
    );
    let sign = if angle < 0.0 { -1.0 } else { 1.0 };

    MoonIllumination {
        fraction: (1.0 + inc.cos()) / 2.0,
        phase: 0.5 + 0.5 * inc * sign / std::f64::consts::PI,
        angle,
    }
}
