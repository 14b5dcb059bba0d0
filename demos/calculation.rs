use chrono::NaiveDate;
use chrono_tz::America::New_York;

use lunar_calendar::{
    lunar_days_for_date, moon_phase_info, moon_zodiac, AnalyticEphemeris, Location, LunarConfig,
};

fn main() {
    let location = Location::new(40.714, -74.006);
    let date = NaiveDate::from_ymd_opt(2026, 2, 8).unwrap();
    let oracle = AnalyticEphemeris::new();

    let days = lunar_days_for_date(&oracle, date, location, New_York, &LunarConfig::default());

    println!("=== Lunar Day Calculation Example ===");
    println!(
        "Location: New York, NY ({:.3}°N, {:.3}°W)",
        location.latitude, -location.longitude
    );
    println!("Date: {}", date);
    println!();

    if days.is_empty() {
        println!("No lunar data for this location and date.");
        return;
    }

    for day in &days {
        let info = moon_phase_info(day);
        println!("--- Lunar day {} ---", day.number);
        println!("Starts: {}", day.start.with_timezone(&New_York));
        println!("Ends:   {}", day.end.with_timezone(&New_York));
        println!("Phase: {}", info.phase);
        println!("Illumination: {:.1}%", info.illumination_pct);
        match info.days_to_full_moon {
            Some(n) => println!("Days to full moon: {}", n),
            None => println!("Days to full moon: waning"),
        }
        if let Some(zodiac) = moon_zodiac(&days, Some(day.number)) {
            println!("Moon in: {}", zodiac);
        }
        println!();
    }
}
