mod common;

use chrono::Duration;

use common::utc;
use lunar_calendar::ephemeris::{bracketing_lunation, mean_new_moon, moon_altitude};
use lunar_calendar::{julian_date, AnalyticEphemeris, EphemerisOracle};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

// ── PhaseHunt ──

#[test]
fn test_phase_hunt_known_new_moons() {
    let oracle = AnalyticEphemeris::new();
    let cases = [
        (utc(2024, 1, 11, 12, 30), utc(2024, 1, 11, 11, 57)),
        (utc(2026, 2, 10, 0, 0), utc(2026, 1, 18, 19, 52)),
    ];
    for (instant, known) in cases {
        let hunt = oracle.phase_hunt(instant);
        let diff = (hunt.new_moon_before - known).num_minutes().abs();
        assert!(diff <= 10, "{instant}: {} vs {known}", hunt.new_moon_before);
    }
}

#[test]
fn test_phase_hunt_brackets_one_lunation() {
    let oracle = AnalyticEphemeris::new();
    let hunt = oracle.phase_hunt(utc(2026, 2, 10, 0, 0));
    let span = hunt.new_moon_after - hunt.new_moon_before;
    assert!(span > Duration::days(29) && span < Duration::days(30), "{span}");
    assert!(hunt.new_moon_after > utc(2026, 2, 17, 11, 0));
    assert!(hunt.new_moon_after < utc(2026, 2, 17, 13, 0));
}

#[test]
fn test_phase_hunt_can_return_new_moon_after_instant() {
    // Lunations are bracketed by their mean new moon.
    let oracle = AnalyticEphemeris::new();
    let instant = utc(2026, 2, 17, 11, 0);
    assert!(oracle.phase_hunt(instant).new_moon_before > instant);
}

#[test]
fn test_bracketing_lunation_contains_instant() {
    let jd = julian_date(utc(2026, 6, 15, 0, 0));
    let k = bracketing_lunation(jd);
    assert!(mean_new_moon(k) <= jd);
    assert!(mean_new_moon(k + 1.0) > jd);
    assert_eq!(k, k.floor());
}

// ── MoonTimes ──

#[test]
fn test_moon_times_new_york() {
    let oracle = AnalyticEphemeris::new();
    let day_start = utc(2026, 2, 9, 5, 0);
    let times = oracle.moon_times(day_start, 40.714, -74.006);
    let rise = times.rise.expect("moonrise on 2026-02-09");
    assert!((rise - utc(2026, 2, 9, 5, 52)).num_minutes().abs() <= 1, "{rise}");
    assert!(times.set.is_some());
    assert!(!times.always_up && !times.always_down);
}

#[test]
fn test_moon_times_day_without_rise() {
    let oracle = AnalyticEphemeris::new();
    let times = oracle.moon_times(utc(2026, 2, 8, 5, 0), 40.714, -74.006);
    assert!(times.rise.is_none());
    assert!(times.set.is_some());
}

#[test]
fn test_moon_times_rise_within_day() {
    let oracle = AnalyticEphemeris::new();
    let day_start = utc(2026, 2, 20, 5, 0);
    for (lat, lon) in [(40.714, -74.006), (-33.8688, 151.2093), (55.7558, 37.6173)] {
        if let Some(rise) = oracle.moon_times(day_start, lat, lon).rise {
            assert!(rise >= day_start && rise < day_start + Duration::days(1));
        }
    }
}

#[test]
fn test_moon_times_near_pole_has_no_events() {
    let oracle = AnalyticEphemeris::new();
    let times = oracle.moon_times(utc(2026, 2, 8, 0, 0), 89.9, 0.0);
    assert!(times.rise.is_none() && times.set.is_none());
    assert!(times.always_up != times.always_down);
}

#[test]
fn test_moon_times_non_finite_coordinates() {
    let oracle = AnalyticEphemeris::new();
    let times = oracle.moon_times(utc(2026, 2, 8, 0, 0), f64::NAN, 0.0);
    assert!(times.rise.is_none() && times.set.is_none());
}

#[test]
fn test_moon_altitude_bounded() {
    for hour in 0..24 {
        let alt = moon_altitude(utc(2026, 2, 9, hour, 0), 40.714, -74.006);
        assert!(alt.abs() <= std::f64::consts::FRAC_PI_2 + 0.01, "{alt}");
    }
}

// ── MoonIllumination ──

#[test]
fn test_illumination_new_and_full_moon() {
    let oracle = AnalyticEphemeris::new();
    let new = oracle.moon_illumination(utc(2026, 2, 17, 12, 0));
    assert!(new.fraction < 0.01, "fraction={}", new.fraction);

    let full = oracle.moon_illumination(utc(2026, 3, 3, 11, 38));
    assert!(full.fraction > 0.98, "fraction={}", full.fraction);
    assert_approx!(full.phase, 0.5, 0.03);
}

#[test]
fn test_illumination_waxing_then_waning() {
    let oracle = AnalyticEphemeris::new();
    let waxing = oracle.moon_illumination(utc(2026, 2, 24, 0, 0));
    let waning = oracle.moon_illumination(utc(2026, 3, 10, 0, 0));
    assert!(waxing.phase > 0.0 && waxing.phase < 0.5, "{}", waxing.phase);
    assert!(waning.phase > 0.5 && waning.phase < 1.0, "{}", waning.phase);
    assert!((0.0..=1.0).contains(&waxing.fraction));
}
