//! Configuration for lunar day queries.

use chrono::Duration;
use serde::Deserialize;

use crate::error::LunarError;

/// Allowed drift per boundary when comparing against regression fixtures.
pub const FIXTURE_TOLERANCE_MS: i64 = 60_000;

/// Tunables for the lunar day pipeline.
///
/// # Example
///
/// ```
/// use lunar_calendar::LunarConfig;
///
/// let config = LunarConfig::new()
///     .with_scan_margin_days(5)
///     .with_fallback_window_minutes(90);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LunarConfig {
    /// Extra calendar days scanned for moonrises past the requested date.
    #[serde(default = "default_scan_margin_days")]
    scan_margin_days: i64,
    /// Length of the synthetic day 1 used when no usable boundary exists
    /// between yesterday's last lunar day and today's day 2.
    #[serde(default = "default_fallback_window_minutes")]
    fallback_window_minutes: i64,
}

fn default_scan_margin_days() -> i64 {
    4
}

fn default_fallback_window_minutes() -> i64 {
    120
}

impl LunarConfig {
    /// Defaults: `scan_margin_days = 4`, `fallback_window_minutes = 120`.
    pub fn new() -> Self {
        Self {
            scan_margin_days: default_scan_margin_days(),
            fallback_window_minutes: default_fallback_window_minutes(),
        }
    }

    pub fn with_scan_margin_days(mut self, days: i64) -> Self {
        self.scan_margin_days = days;
        self
    }

    pub fn with_fallback_window_minutes(mut self, minutes: i64) -> Self {
        self.fallback_window_minutes = minutes;
        self
    }

    pub fn scan_margin_days(&self) -> i64 {
        self.scan_margin_days
    }

    pub fn fallback_window_minutes(&self) -> i64 {
        self.fallback_window_minutes
    }

    pub fn fallback_window(&self) -> Duration {
        Duration::minutes(self.fallback_window_minutes)
    }

    /// Returns an error if the scan margin is below one day or the fallback
    /// window is not between one minute and one day.
    pub fn validate(&self) -> Result<(), LunarError> {
        if self.scan_margin_days < 1 {
            return Err(LunarError::InvalidConfig {
                field: "scan_margin_days",
                reason: format!("must be >= 1, got {}", self.scan_margin_days),
            });
        }
        if !(1..=24 * 60).contains(&self.fallback_window_minutes) {
            return Err(LunarError::InvalidConfig {
                field: "fallback_window_minutes",
                reason: format!(
                    "must be within 1..=1440, got {}",
                    self.fallback_window_minutes
                ),
            });
        }
        Ok(())
    }
}

impl Default for LunarConfig {
    fn default() -> Self {
        Self::new()
    }
}
