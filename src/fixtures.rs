//! Regression fixtures: recorded day queries and zodiac signs that later
//! runs must reproduce within [`FIXTURE_TOLERANCE_MS`] per boundary.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calendar::{parse_date, parse_timezone};
use crate::config::{LunarConfig, FIXTURE_TOLERANCE_MS};
use crate::ephemeris::EphemerisOracle;
use crate::error::LunarError;
use crate::lunar::lunar_days_for_date;
use crate::types::{Location, LunarDay, ZodiacSign};
use crate::zodiac::moon_zodiac;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSet {
    pub generated_at: String,
    pub cases: Vec<RegressionCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionCase {
    pub id: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub expected: Expected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expected {
    pub moon_days: Vec<LunarDay>,
    pub zodiac: Option<ZodiacSign>,
}

/// Location and date of a case before its expectation is recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaseInput<'a> {
    pub id: &'a str,
    pub date: &'a str,
    pub timezone: &'a str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Cities and dates covering both hemispheres, a new moon crossing and a
/// day 1 that starts and ends within one calendar date.
pub const DEFAULT_CASES: [CaseInput<'static>; 6] = [
    CaseInput {
        id: "nyc-2026-02-08",
        date: "2026-02-08",
        timezone: "America/New_York",
        latitude: 40.714,
        longitude: -74.006,
    },
    CaseInput {
        id: "moscow-2026-02-08",
        date: "2026-02-08",
        timezone: "Europe/Moscow",
        latitude: 55.7558,
        longitude: 37.6173,
    },
    CaseInput {
        id: "sydney-2026-06-15",
        date: "2026-06-15",
        timezone: "Australia/Sydney",
        latitude: -33.8688,
        longitude: 151.2093,
    },
    CaseInput {
        id: "tokyo-2026-12-01",
        date: "2026-12-01",
        timezone: "Asia/Tokyo",
        latitude: 35.6762,
        longitude: 139.6503,
    },
    CaseInput {
        id: "nyc-2026-02-17-new-moon",
        date: "2026-02-17",
        timezone: "America/New_York",
        latitude: 40.714,
        longitude: -74.006,
    },
    CaseInput {
        id: "tokyo-2026-01-19-fallback",
        date: "2026-01-19",
        timezone: "Asia/Tokyo",
        latitude: 35.6762,
        longitude: 139.6503,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub enum FixtureMismatch {
    Length {
        id: String,
        expected: usize,
        actual: usize,
    },
    Number {
        id: String,
        index: usize,
        expected: u32,
        actual: u32,
    },
    Drift {
        id: String,
        index: usize,
        start_diff_ms: i64,
        end_diff_ms: i64,
    },
    Zodiac {
        id: String,
        expected: Option<ZodiacSign>,
        actual: Option<ZodiacSign>,
    },
}

impl fmt::Display for FixtureMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length {
                id,
                expected,
                actual,
            } => write!(
                f,
                "[{id}] moon day length mismatch: expected {expected}, got {actual}"
            ),
            Self::Number {
                id,
                index,
                expected,
                actual,
            } => write!(
                f,
                "[{id}] moon day number mismatch at {index}: expected {expected}, got {actual}"
            ),
            Self::Drift {
                id,
                index,
                start_diff_ms,
                end_diff_ms,
            } => write!(
                f,
                "[{id}] moon day time drift at {index}: start diff {start_diff_ms}ms, end diff {end_diff_ms}ms"
            ),
            Self::Zodiac {
                id,
                expected,
                actual,
            } => write!(
                f,
                "[{id}] zodiac mismatch: expected {}, got {}",
                display_sign(*expected),
                display_sign(*actual)
            ),
        }
    }
}

fn display_sign(sign: Option<ZodiacSign>) -> &'static str {
    sign.map_or("none", ZodiacSign::as_str)
}

/// Day query for a case, ordered by lunar day number, with the zodiac of
/// the lowest-numbered window.
pub fn compute_expected<E: EphemerisOracle>(
    oracle: &E,
    input: &CaseInput<'_>,
    config: &LunarConfig,
) -> Result<Expected, LunarError> {
    let date = parse_date(input.date)?;
    let tz = parse_timezone(input.timezone)?;
    let location = Location::new(input.latitude, input.longitude);

    let mut moon_days = lunar_days_for_date(oracle, date, location, tz, config);
    moon_days.sort_by_key(|day| day.number);
    let zodiac = moon_zodiac(&moon_days, None);
    Ok(Expected { moon_days, zodiac })
}

pub fn generate<E: EphemerisOracle>(
    oracle: &E,
    inputs: &[CaseInput<'_>],
    config: &LunarConfig,
    generated_at: String,
) -> Result<FixtureSet, LunarError> {
    let cases = inputs
        .iter()
        .map(|input| {
            Ok(RegressionCase {
                id: input.id.to_string(),
                date: input.date.to_string(),
                timezone: input.timezone.to_string(),
                latitude: input.latitude,
                longitude: input.longitude,
                expected: compute_expected(oracle, input, config)?,
            })
        })
        .collect::<Result<Vec<_>, LunarError>>()?;
    Ok(FixtureSet {
        generated_at,
        cases,
    })
}

/// Compares a fresh computation for `case` against its recorded expectation.
pub fn verify_case<E: EphemerisOracle>(
    oracle: &E,
    case: &RegressionCase,
    config: &LunarConfig,
) -> Result<Vec<FixtureMismatch>, LunarError> {
    let input = CaseInput {
        id: &case.id,
        date: &case.date,
        timezone: &case.timezone,
        latitude: case.latitude,
        longitude: case.longitude,
    };
    let actual = compute_expected(oracle, &input, config)?;
    Ok(compare(&case.id, &case.expected, &actual))
}

pub fn compare(id: &str, expected: &Expected, actual: &Expected) -> Vec<FixtureMismatch> {
    if expected.moon_days.len() != actual.moon_days.len() {
        return vec![FixtureMismatch::Length {
            id: id.to_string(),
            expected: expected.moon_days.len(),
            actual: actual.moon_days.len(),
        }];
    }

    let day_mismatches = expected
        .moon_days
        .iter()
        .zip(&actual.moon_days)
        .enumerate()
        .filter_map(|(index, (exp, act))| {
            if exp.number != act.number {
                return Some(FixtureMismatch::Number {
                    id: id.to_string(),
                    index,
                    expected: exp.number,
                    actual: act.number,
                });
            }
            let start_diff_ms = (act.start - exp.start).num_milliseconds().abs();
            let end_diff_ms = (act.end - exp.end).num_milliseconds().abs();
            (start_diff_ms > FIXTURE_TOLERANCE_MS || end_diff_ms > FIXTURE_TOLERANCE_MS).then(
                || FixtureMismatch::Drift {
                    id: id.to_string(),
                    index,
                    start_diff_ms,
                    end_diff_ms,
                },
            )
        });

    let zodiac_mismatch = (expected.zodiac != actual.zodiac).then(|| FixtureMismatch::Zodiac {
        id: id.to_string(),
        expected: expected.zodiac,
        actual: actual.zodiac,
    });

    day_mismatches.chain(zodiac_mismatch).collect()
}

pub fn verify<E: EphemerisOracle>(
    oracle: &E,
    set: &FixtureSet,
    config: &LunarConfig,
) -> Result<Vec<FixtureMismatch>, LunarError> {
    let mut mismatches = Vec::new();
    for case in &set.cases {
        let found = verify_case(oracle, case, config)?;
        if found.is_empty() {
            info!(id = %case.id, "fixture passed");
        }
        for mismatch in &found {
            warn!("{mismatch}");
        }
        mismatches.extend(found);
    }
    Ok(mismatches)
}

pub fn load(path: &Path) -> Result<FixtureSet, LunarError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn save(set: &FixtureSet, path: &Path) -> Result<(), LunarError> {
    fs::write(path, serde_json::to_string_pretty(set)?)?;
    Ok(())
}
