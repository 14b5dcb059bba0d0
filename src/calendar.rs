//! Local calendar primitives: day boundaries in a timezone, date and
//! timezone parsing, month enumeration.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::angles::days_in_months;
use crate::error::LunarError;

pub fn parse_timezone(name: &str) -> Result<Tz, LunarError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| LunarError::InvalidTimezone(name.to_string()))
}

/// Parses `YYYY-MM-DD` or `DD-MM-YYYY`.
pub fn parse_date(input: &str) -> Result<NaiveDate, LunarError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d-%m-%Y"))
        .map_err(|_| LunarError::InvalidDate {
            input: input.to_string(),
        })
}

/// First instant of `date` in `tz`.
///
/// An ambiguous midnight resolves to the earlier instant. A midnight that
/// falls in a DST gap resolves with the offset in force before the
/// transition, which lands on the first local time after the gap.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => t.with_timezone(&Utc),
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(&(midnight - Duration::days(1)))
                .fix();
            Utc.from_utc_datetime(&(midnight - before))
        }
    }
}

/// Last millisecond of `date` in `tz`.
pub fn end_of_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    match date.succ_opt() {
        Some(next) => start_of_day(next, tz) - Duration::milliseconds(1),
        None => start_of_day(date, tz) + Duration::days(1) - Duration::milliseconds(1),
    }
}

pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Local 12:00 of `date`, used for per-day illumination sampling.
pub fn local_noon(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
    tz.from_local_datetime(&noon)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| start_of_day(date, tz) + Duration::hours(12))
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    Some(days_in_months(year)[(month - 1) as usize])
}

/// Every calendar date of `month` in `year`, in order.
pub fn month_dates(year: i32, month: u32) -> Result<Vec<NaiveDate>, LunarError> {
    let invalid = || LunarError::InvalidMonth { month, year };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let len = days_in_month(year, month).ok_or_else(invalid)?;
    Ok(first.iter_days().take(len as usize).collect())
}
