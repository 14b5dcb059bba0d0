//! Boundary repair between consecutive day queries.
//!
//! Each date is partitioned from its own most recent new moon, so the
//! windows computed for today do not always line up with the tail of the
//! windows computed for yesterday. Around a new moon today's partition can
//! start with day 1 while yesterday's lunation is still running, or start
//! with day 2 because day 1 fell entirely inside today.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::types::LunarDay;

/// Entries to put in front of today's raw partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Today's partition stands as computed.
    Unchanged,
    /// Today starts with day 1. Yesterday's last day is carried over while
    /// it still runs into today, and any gap before the new moon is bridged
    /// with the next number of yesterday's lunation.
    PrependPrevious {
        carried: Option<LunarDay>,
        bridge: Option<LunarDay>,
    },
    /// Today starts with day 2 and yesterday ended before it: day 1 fills
    /// the gap.
    SynthesizeGap {
        carried: Option<LunarDay>,
        day_one: LunarDay,
    },
    /// Today starts with day 2 with no gap to fill: day 1 is a fixed window
    /// ending at day 2 and yesterday's last day is clipped to meet it.
    SynthesizeFallbackWindow {
        trimmed: Option<LunarDay>,
        day_one: LunarDay,
    },
}

impl Reconciliation {
    /// Chooses the repair for `current` (today's first window) given
    /// `previous` (yesterday's last window).
    pub fn plan(
        current: &LunarDay,
        previous: &LunarDay,
        day_start: DateTime<Utc>,
        fallback_window: Duration,
    ) -> Self {
        let covers_today = |day: &LunarDay| day.end > day_start;
        let gap = current.start - previous.end;

        match current.number {
            1 if previous.number != 1 => {
                let carried = Some(*previous).filter(covers_today);
                let bridge = (gap > Duration::zero())
                    .then(|| LunarDay::new(previous.number + 1, previous.end, current.start))
                    .filter(covers_today);
                if carried.is_none() && bridge.is_none() {
                    Self::Unchanged
                } else {
                    Self::PrependPrevious { carried, bridge }
                }
            }
            2 if previous.number != 1 => {
                let carry = previous.number != current.number;
                if gap > Duration::zero() {
                    let day_one = LunarDay::new(1, previous.end, current.start);
                    if !covers_today(&day_one) {
                        return Self::Unchanged;
                    }
                    Self::SynthesizeGap {
                        carried: Some(*previous).filter(|day| carry && covers_today(day)),
                        day_one,
                    }
                } else {
                    let synthetic_start = current.start - fallback_window;
                    let day_one = LunarDay::new(1, synthetic_start, current.start);
                    if !covers_today(&day_one) {
                        return Self::Unchanged;
                    }
                    let trimmed = LunarDay::new(previous.number, previous.start, synthetic_start);
                    Self::SynthesizeFallbackWindow {
                        trimmed: Some(trimmed)
                            .filter(|day| carry && day.start < day.end && covers_today(day)),
                        day_one,
                    }
                }
            }
            _ => Self::Unchanged,
        }
    }

    /// Entries that go before today's raw partition, oldest first.
    pub fn leading(&self) -> Vec<LunarDay> {
        match *self {
            Self::Unchanged => Vec::new(),
            Self::PrependPrevious { carried, bridge } => {
                carried.into_iter().chain(bridge).collect()
            }
            Self::SynthesizeGap { carried, day_one }
            | Self::SynthesizeFallbackWindow {
                trimmed: carried,
                day_one,
            } => carried.into_iter().chain(Some(day_one)).collect(),
        }
    }

    pub fn apply(&self, today: &[LunarDay]) -> Vec<LunarDay> {
        self.leading()
            .into_iter()
            .chain(today.iter().copied())
            .collect()
    }
}

/// Reconciles `today` (raw windows for the requested date) against
/// `yesterday` (raw windows for the date before).
pub fn reconcile(
    today: &[LunarDay],
    yesterday: &[LunarDay],
    day_start: DateTime<Utc>,
    fallback_window: Duration,
) -> Vec<LunarDay> {
    let (Some(current), Some(previous)) = (today.first(), yesterday.last()) else {
        return today.to_vec();
    };
    let plan = Reconciliation::plan(current, previous, day_start, fallback_window);
    if plan != Reconciliation::Unchanged {
        debug!(?plan, "reconciled lunar day boundary");
    }
    plan.apply(today)
}
