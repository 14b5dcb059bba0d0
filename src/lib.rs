pub mod angles;
pub mod calendar;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod fixtures;
pub mod lunar;
pub mod month;
pub mod phase;
pub mod reconcile;
pub mod types;
pub mod zodiac;

pub use angles::{deg_to_rad, julian_date, normalize_angle, normalize_radians, rad_to_deg};

pub use calendar::{end_of_day, local_date, parse_date, parse_timezone, start_of_day};

pub use config::{LunarConfig, FIXTURE_TOLERANCE_MS};

pub use ephemeris::{AnalyticEphemeris, EphemerisOracle};

pub use error::LunarError;

pub use lunar::{
    active_lunar_day, lunar_days_for_date, moonrise_sequence, overlapping_date, partition,
    raw_lunar_days, recent_new_moon, rises_on_day, sort_by_start,
};

pub use month::{lunar_days_for_month, summarize_month};

pub use phase::{days_to_full_moon, illumination_pct, moon_phase_info, phase_for_day};

pub use reconcile::{reconcile, Reconciliation};

pub use types::{
    CalendarDaySummary, Location, LunarDay, MoonIllumination, MoonPhase, MoonPhaseInfo,
    MoonTimes, PhaseHunt, ZodiacSign,
};

pub use zodiac::{moon_ecliptic_longitude, moon_zodiac, sign_index, zodiac_at};
