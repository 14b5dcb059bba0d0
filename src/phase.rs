use crate::types::{LunarDay, MoonPhase, MoonPhaseInfo};

/// Lunar day number at which the moon is considered full.
pub const FULL_MOON_DAY: u32 = 16;

pub fn phase_for_day(number: u32) -> MoonPhase {
    match number {
        1 => MoonPhase::NewMoon,
        2..=7 => MoonPhase::WaxingCrescent,
        8..=14 => MoonPhase::WaxingGibbous,
        15..=16 => MoonPhase::FullMoon,
        17..=22 => MoonPhase::WaningGibbous,
        23..=28 => MoonPhase::WaningCrescent,
        _ => MoonPhase::NewMoon,
    }
}

/// Linear illumination estimate, capped at 100 %.
pub fn illumination_pct(number: u32) -> f64 {
    (100.0 / 29.0 * number as f64).min(100.0)
}

pub fn days_to_full_moon(number: u32) -> Option<u32> {
    (number <= FULL_MOON_DAY).then(|| FULL_MOON_DAY - number)
}

pub fn moon_phase_info(day: &LunarDay) -> MoonPhaseInfo {
    MoonPhaseInfo {
        phase: phase_for_day(day.number),
        illumination_pct: illumination_pct(day.number),
        days_to_full_moon: days_to_full_moon(day.number),
        rise_time: day.start,
        set_time: day.end,
    }
}
