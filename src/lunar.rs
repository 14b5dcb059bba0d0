//! Lunar day construction: new moon lookup, moonrise scanning, partitioning
//! and the reconciled per-date query.
//!
//! ```text
//! lunar_days_for_date()
//!   ├─ raw_lunar_days(date)          today
//!   │    ├─ recent_new_moon()
//!   │    ├─ moonrise_sequence()
//!   │    ├─ partition()
//!   │    └─ overlapping_date()
//!   ├─ raw_lunar_days(date - 1)      yesterday
//!   └─ reconcile()                   (reconcile.rs)
//! ```

use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, trace};

use crate::calendar::{end_of_day, local_date, start_of_day};
use crate::config::LunarConfig;
use crate::ephemeris::EphemerisOracle;
use crate::reconcile::reconcile;
use crate::types::{LunarDay, Location};

/// Most recent new moon at or before the local calendar day `date`.
///
/// The phase hunt runs at the end of the day first. When that lands on a
/// new moon after the day has ended, the hunt is repeated from the start of
/// the day so the previous lunation is picked instead.
pub fn recent_new_moon<E: EphemerisOracle>(oracle: &E, date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let end = end_of_day(date, tz);
    let hunt = oracle.phase_hunt(end);
    if hunt.new_moon_before > end {
        oracle.phase_hunt(start_of_day(date, tz)).new_moon_before
    } else {
        hunt.new_moon_before
    }
}

/// Calendar days scanned past the new moon's own day.
pub fn scan_length(new_moon: DateTime<Utc>, date: NaiveDate, tz: Tz, margin_days: i64) -> u64 {
    let elapsed = (date - local_date(new_moon, tz)).num_days();
    (elapsed + margin_days).max(0) as u64
}

/// Moonrises inside the local day `date`, i.e. in
/// `[start_of_day(date), start_of_day(date + 1))`.
///
/// The oracle answers for 24 hours at a time, so a 23-hour day drops rises
/// that belong to the next date and a 25-hour day is queried twice.
pub fn rises_on_day<E: EphemerisOracle>(
    oracle: &E,
    date: NaiveDate,
    location: Location,
    tz: Tz,
) -> Vec<DateTime<Utc>> {
    let start = start_of_day(date, tz);
    let next = end_of_day(date, tz) + Duration::milliseconds(1);
    let mut rises = Vec::new();
    let mut window = start;
    while window < next {
        let window_end = (window + Duration::days(1)).min(next);
        let found = oracle
            .moon_times(window, location.latitude, location.longitude)
            .rise
            .filter(|rise| *rise >= window && *rise < window_end);
        rises.extend(found);
        window = window_end;
    }
    rises
}

/// Moonrises on each local day from the new moon's day through
/// `scan_len` days later, strictly after the new moon.
pub fn moonrise_sequence<E: EphemerisOracle>(
    oracle: &E,
    new_moon: DateTime<Utc>,
    location: Location,
    tz: Tz,
    scan_len: u64,
) -> Vec<DateTime<Utc>> {
    let first_day = local_date(new_moon, tz);
    (0..=scan_len)
        .filter_map(|offset| first_day.checked_add_days(Days::new(offset)))
        .flat_map(|day| rises_on_day(oracle, day, location, tz))
        .skip_while(|rise| *rise <= new_moon)
        .collect()
}

/// Numbered windows: day 1 from the new moon to the first rise, then one
/// window per consecutive pair of rises.
pub fn partition(new_moon: DateTime<Utc>, rises: &[DateTime<Utc>]) -> Vec<LunarDay> {
    let Some(&first_rise) = rises.first() else {
        return Vec::new();
    };
    std::iter::once(LunarDay::new(1, new_moon, first_rise))
        .chain(
            rises
                .windows(2)
                .zip(2..)
                .map(|(pair, number)| LunarDay::new(number, pair[0], pair[1])),
        )
        .collect()
}

/// Windows that are open across the start or the end of `date`.
pub fn overlapping_date(days: Vec<LunarDay>, date: NaiveDate, tz: Tz) -> Vec<LunarDay> {
    let day_start = start_of_day(date, tz);
    let day_end = end_of_day(date, tz);
    days.into_iter()
        .filter(|day| day.straddles(day_start) || day.straddles(day_end))
        .collect()
}

/// Lunar days covering `date`, computed from the most recent new moon only.
pub fn raw_lunar_days<E: EphemerisOracle>(
    oracle: &E,
    date: NaiveDate,
    location: Location,
    tz: Tz,
    config: &LunarConfig,
) -> Vec<LunarDay> {
    let new_moon = recent_new_moon(oracle, date, tz);
    let scan_len = scan_length(new_moon, date, tz, config.scan_margin_days());
    let rises = moonrise_sequence(oracle, new_moon, location, tz, scan_len);
    trace!(%date, %new_moon, scan_len, rises = rises.len(), "scanned moonrises");
    overlapping_date(partition(new_moon, &rises), date, tz)
}

/// Lunar days covering `date` at `location`, with the boundary against the
/// previous day's lunation reconciled.
///
/// An empty result means no lunar data is available for this location and
/// date, e.g. no moonrise in the whole scan window or non-finite coordinates.
#[tracing::instrument(skip(oracle, config), fields(lat = location.latitude, lon = location.longitude))]
pub fn lunar_days_for_date<E: EphemerisOracle>(
    oracle: &E,
    date: NaiveDate,
    location: Location,
    tz: Tz,
    config: &LunarConfig,
) -> Vec<LunarDay> {
    let today = raw_lunar_days(oracle, date, location, tz, config);
    let yesterday = date
        .pred_opt()
        .map(|prev| raw_lunar_days(oracle, prev, location, tz, config))
        .unwrap_or_default();
    let days = reconcile(&today, &yesterday, start_of_day(date, tz), config.fallback_window());
    debug!(count = days.len(), "computed lunar days");
    days
}

/// Orders windows by start instant.
pub fn sort_by_start(mut days: Vec<LunarDay>) -> Vec<LunarDay> {
    days.sort_by_key(|day| day.start);
    days
}

/// The window containing `instant`, else the first window.
pub fn active_lunar_day(days: &[LunarDay], instant: DateTime<Utc>) -> Option<&LunarDay> {
    days.iter()
        .find(|day| day.contains(instant))
        .or_else(|| days.first())
}
