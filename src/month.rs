//! Month-wide expansion for calendar overlays.

use chrono_tz::Tz;
use tracing::debug;

use crate::calendar::{local_noon, month_dates};
use crate::config::LunarConfig;
use crate::ephemeris::EphemerisOracle;
use crate::error::LunarError;
use crate::lunar::lunar_days_for_date;
use crate::types::{CalendarDaySummary, Location, LunarDay};
use crate::zodiac::moon_zodiac;

/// One reconciled day query per calendar day of `month`.
///
/// Neighbouring entries recompute the same lunar windows independently;
/// nothing is shared or deduplicated between days.
#[tracing::instrument(skip(oracle, config), fields(lat = location.latitude, lon = location.longitude))]
pub fn lunar_days_for_month<E: EphemerisOracle>(
    oracle: &E,
    year: i32,
    month: u32,
    location: Location,
    tz: Tz,
    config: &LunarConfig,
) -> Result<Vec<Vec<LunarDay>>, LunarError> {
    let dates = month_dates(year, month)?;
    debug!(days = dates.len(), "expanding month");
    Ok(dates
        .into_iter()
        .map(|date| lunar_days_for_date(oracle, date, location, tz, config))
        .collect())
}

/// Overlay summary for each entry of a month result; `None` for days
/// without lunar data.
pub fn summarize_month<E: EphemerisOracle>(
    oracle: &E,
    year: i32,
    month: u32,
    tz: Tz,
    month_days: &[Vec<LunarDay>],
) -> Result<Vec<Option<CalendarDaySummary>>, LunarError> {
    let dates = month_dates(year, month)?;
    Ok(dates
        .into_iter()
        .zip(month_days)
        .map(|(date, days)| {
            let zodiac = moon_zodiac(days, None)?;
            let mut numbers: Vec<u32> = days.iter().map(|day| day.number).collect();
            numbers.sort_unstable();
            numbers.dedup();
            let illumination = oracle.moon_illumination(local_noon(date, tz));
            Some(CalendarDaySummary {
                zodiac,
                lunar_day_numbers: numbers,
                illumination_pct: illumination.fraction * 100.0,
                is_waxing: illumination.phase < 0.5,
            })
        })
        .collect())
}
