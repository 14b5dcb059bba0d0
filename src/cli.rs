use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lunar day and moon zodiac calculator.
#[derive(Parser)]
#[command(
    name = "lunar-calendar",
    version,
    about = "Lunar days, moon phases and moon zodiac signs for a place and date"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Lunar days covering one calendar date.
    Day(DayArgs),
    /// Lunar days for every date of a month.
    Month(MonthArgs),
    /// Generate or verify regression fixtures.
    #[command(subcommand)]
    Fixtures(FixturesCommand),
}

/// Location and timezone shared by the query subcommands.
#[derive(clap::Args)]
pub struct PlaceArgs {
    /// Latitude in degrees, north positive.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in degrees, east positive.
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// IANA timezone identifier, e.g. Europe/Moscow.
    #[arg(long, default_value = "UTC")]
    pub tz: String,

    /// Extra days scanned for moonrises past the requested date.
    #[arg(long)]
    pub scan_margin_days: Option<i64>,
}

/// Arguments for the `day` subcommand.
#[derive(clap::Args)]
pub struct DayArgs {
    /// Calendar date, YYYY-MM-DD or DD-MM-YYYY.
    #[arg(short, long)]
    pub date: String,

    #[command(flatten)]
    pub place: PlaceArgs,
}

/// Arguments for the `month` subcommand.
#[derive(clap::Args)]
pub struct MonthArgs {
    #[arg(long)]
    pub year: i32,

    /// Month number, 1-12.
    #[arg(long)]
    pub month: u32,

    /// Emit overlay summaries instead of raw lunar days.
    #[arg(long)]
    pub summary: bool,

    #[command(flatten)]
    pub place: PlaceArgs,
}

#[derive(Subcommand)]
pub enum FixturesCommand {
    /// Record the built-in regression cases.
    Generate {
        /// Path for the fixture JSON file.
        #[arg(short, long, default_value = "tests/data/fixtures.json")]
        output: PathBuf,
    },
    /// Recompute recorded cases and report drift.
    Verify {
        /// Path to a fixture JSON file.
        #[arg(short, long, default_value = "tests/data/fixtures.json")]
        input: PathBuf,
    },
}
