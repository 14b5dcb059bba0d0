//! Error types for the lunar_calendar input surface.
//!
//! The calculation pipeline itself never fails; these errors come from
//! parsing caller input, validating configuration and reading fixtures.

/// Error type for all fallible operations in the lunar_calendar crate.
#[derive(Debug, thiserror::Error)]
pub enum LunarError {
    /// Returned when a timezone identifier is not in the IANA database.
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Returned when a date string matches none of the accepted formats.
    #[error("invalid date '{input}', expected YYYY-MM-DD or DD-MM-YYYY")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// Returned when a month/year pair does not name a calendar month.
    #[error("invalid month {month} of year {year}")]
    InvalidMonth {
        /// Requested month, 1-based.
        month: u32,
        /// Requested year.
        year: i32,
    },

    /// Returned when a configuration field is out of range.
    #[error("invalid config: {field} {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Returned when a zodiac identifier is not one of the twelve signs.
    #[error("unknown zodiac sign: {0}")]
    UnknownZodiac(String),

    #[error("fixture I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fixture JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
