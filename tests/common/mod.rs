#![allow(dead_code)]

use std::f64::consts::TAU;

use chrono::{DateTime, Duration, TimeZone, Utc};

use lunar_calendar::{EphemerisOracle, MoonIllumination, MoonTimes, PhaseHunt};

pub const SYNODIC_DAYS: f64 = 29.530_588;

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

/// Deterministic sky: new moons from a table and a moonrise every
/// `rise_period` starting at `first_rise`.
#[derive(Debug, Clone)]
pub struct StubSky {
    pub new_moons: Vec<DateTime<Utc>>,
    pub first_rise: DateTime<Utc>,
    pub rise_period: Duration,
}

impl StubSky {
    /// New moons of January to March 2026 and a 24h50m rise cadence.
    pub fn winter_2026() -> Self {
        Self {
            new_moons: vec![
                utc(2026, 1, 18, 19, 52),
                utc(2026, 2, 17, 12, 1),
                utc(2026, 3, 19, 1, 23),
            ],
            first_rise: utc(2026, 1, 1, 7, 0),
            rise_period: Duration::minutes(24 * 60 + 50),
        }
    }

    /// New moons of autumn 2026 with a rise landing in the last hour of
    /// New York's 25-hour 2026-11-01.
    pub fn autumn_2026() -> Self {
        Self {
            new_moons: vec![utc(2026, 10, 10, 15, 50), utc(2026, 11, 9, 7, 2)],
            first_rise: utc(2026, 9, 21, 19, 10),
            rise_period: Duration::minutes(24 * 60 + 50),
        }
    }

    /// Same lunations as [`StubSky::winter_2026`], with a rise 30 minutes
    /// after Havana's 23-hour 2026-03-08 has ended.
    pub fn havana_spring_2026() -> Self {
        Self {
            first_rise: utc(2026, 1, 16, 10, 50),
            ..Self::winter_2026()
        }
    }

    fn last_new_moon(&self, instant: DateTime<Utc>) -> usize {
        self.new_moons
            .iter()
            .rposition(|nm| *nm <= instant)
            .unwrap_or(0)
    }
}

impl EphemerisOracle for StubSky {
    fn phase_hunt(&self, instant: DateTime<Utc>) -> PhaseHunt {
        let idx = self.last_new_moon(instant);
        let before = self.new_moons[idx];
        let after = self
            .new_moons
            .get(idx + 1)
            .copied()
            .unwrap_or(before + Duration::days(30));
        PhaseHunt {
            new_moon_before: before,
            new_moon_after: after,
        }
    }

    fn moon_times(&self, day_start: DateTime<Utc>, latitude: f64, longitude: f64) -> MoonTimes {
        if !latitude.is_finite() || !longitude.is_finite() {
            return MoonTimes::default();
        }
        let period = self.rise_period.num_milliseconds();
        let elapsed = (day_start - self.first_rise).num_milliseconds();
        let k = elapsed.div_euclid(period) + i64::from(elapsed.rem_euclid(period) != 0);
        let rise = self.first_rise + Duration::milliseconds(k * period);
        MoonTimes {
            rise: (rise < day_start + Duration::days(1)).then_some(rise),
            ..MoonTimes::default()
        }
    }

    fn moon_illumination(&self, instant: DateTime<Utc>) -> MoonIllumination {
        let nm = self.new_moons[self.last_new_moon(instant)];
        let age = (instant - nm).num_milliseconds() as f64 / 86_400_000.0;
        let phase = (age / SYNODIC_DAYS).rem_euclid(1.0);
        MoonIllumination {
            fraction: (1.0 - (phase * TAU).cos()) / 2.0,
            phase,
            angle: 0.0,
        }
    }
}
