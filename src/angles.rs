use std::f64::consts::{PI, TAU};

use chrono::{DateTime, Utc};

pub const MS_PER_DAY: f64 = 86_400_000.0;
/// Julian date of the Unix epoch, 1970-01-01T00:00:00Z.
pub const JD_UNIX_EPOCH: f64 = 2_440_587.5;
pub const J2000: f64 = 2_451_545.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Reduces an angle in radians into `[0, 2π)`.
pub fn normalize_radians(angle: f64) -> f64 {
    angle - (angle / TAU).floor() * TAU
}

pub fn leap_year(year: i32) -> bool {
    (year % 400 == 0) || (year % 4 == 0 && year % 100 != 0)
}

pub fn days_in_months(year: i32) -> [u32; 12] {
    [
        31,
        if leap_year(year) { 29 } else { 28 },
        31, 30, 31, 30, 31, 31, 30, 31, 30, 31,
    ]
}

pub fn julian_date(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / MS_PER_DAY + JD_UNIX_EPOCH
}

/// Days elapsed since the J2000.0 epoch.
pub fn days_since_j2000(instant: DateTime<Utc>) -> f64 {
    julian_date(instant) - J2000
}

/// Instant for a Julian date, rounded to the millisecond.
///
/// Dates outside chrono's representable range collapse to the Unix epoch.
pub fn instant_from_julian(jd: f64) -> DateTime<Utc> {
    let ms = ((jd - JD_UNIX_EPOCH) * MS_PER_DAY).round() as i64;
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

/// `instant` shifted by a fractional number of hours, rounded to the millisecond.
pub fn hours_later(instant: DateTime<Utc>, hours: f64) -> DateTime<Utc> {
    let ms = instant.timestamp_millis() + (hours * 3_600_000.0).round() as i64;
    DateTime::from_timestamp_millis(ms).unwrap_or(instant)
}
