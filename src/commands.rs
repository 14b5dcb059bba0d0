use std::fs;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use chrono_tz::Tz;
use serde::Serialize;
use tracing::info;

use lunar_calendar::fixtures::{self, DEFAULT_CASES};
use lunar_calendar::{
    lunar_days_for_date, lunar_days_for_month, moon_phase_info, moon_zodiac, parse_date,
    parse_timezone, summarize_month, AnalyticEphemeris, Location, LunarConfig, LunarDay,
    MoonPhaseInfo, ZodiacSign,
};

use crate::cli::{DayArgs, FixturesCommand, MonthArgs, PlaceArgs};

#[derive(Serialize)]
struct DayReport {
    #[serde(flatten)]
    day: LunarDay,
    info: MoonPhaseInfo,
    zodiac: Option<ZodiacSign>,
}

fn resolve_place(place: &PlaceArgs) -> Result<(Location, Tz, LunarConfig)> {
    let location = Location::new(place.lat, place.lon);
    if !location.is_valid() {
        bail!(
            "coordinates out of range: lat {}, lon {}",
            place.lat,
            place.lon
        );
    }
    let tz = parse_timezone(&place.tz)?;
    let config = match place.scan_margin_days {
        Some(days) => LunarConfig::new().with_scan_margin_days(days),
        None => LunarConfig::default(),
    };
    config.validate()?;
    Ok((location, tz, config))
}

pub fn day(args: DayArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let (location, tz, config) = resolve_place(&args.place)?;
    let oracle = AnalyticEphemeris::new();

    let days = lunar_days_for_date(&oracle, date, location, tz, &config);
    if days.is_empty() {
        info!(%date, "no lunar data for this location and date");
    }
    let report: Vec<DayReport> = days
        .iter()
        .map(|day| DayReport {
            day: *day,
            info: moon_phase_info(day),
            zodiac: moon_zodiac(&days, Some(day.number)),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn month(args: MonthArgs) -> Result<()> {
    let (location, tz, config) = resolve_place(&args.place)?;
    let oracle = AnalyticEphemeris::new();

    let month_days = lunar_days_for_month(&oracle, args.year, args.month, location, tz, &config)?;
    let json = if args.summary {
        let summaries = summarize_month(&oracle, args.year, args.month, tz, &month_days)?;
        serde_json::to_string_pretty(&summaries)?
    } else {
        serde_json::to_string_pretty(&month_days)?
    };
    println!("{json}");
    Ok(())
}

pub fn fixtures(command: FixturesCommand) -> Result<()> {
    let oracle = AnalyticEphemeris::new();
    let config = LunarConfig::default();

    match command {
        FixturesCommand::Generate { output } => {
            let set = fixtures::generate(&oracle, &DEFAULT_CASES, &config, Utc::now().to_rfc3339())?;
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            fixtures::save(&set, &output)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Wrote fixtures to {}", output.display());
        }
        FixturesCommand::Verify { input } => {
            let set = fixtures::load(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let mismatches = fixtures::verify(&oracle, &set, &config)?;
            if !mismatches.is_empty() {
                for mismatch in &mismatches {
                    eprintln!("{mismatch}");
                }
                bail!(
                    "fixture verification failed with {} issue(s)",
                    mismatches.len()
                );
            }
            println!("All fixtures passed.");
        }
    }
    Ok(())
}
