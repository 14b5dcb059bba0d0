mod common;

use chrono::{DateTime, Duration, Utc};

use common::utc;
use lunar_calendar::{reconcile, LunarDay, Reconciliation};

fn day_start() -> DateTime<Utc> {
    utc(2026, 2, 17, 0, 0)
}

fn two_hours() -> Duration {
    Duration::hours(2)
}

fn plan(current: LunarDay, previous: LunarDay) -> Reconciliation {
    Reconciliation::plan(&current, &previous, day_start(), two_hours())
}

// ── Unchanged ──

#[test]
fn test_mid_lunation_is_unchanged() {
    let previous = LunarDay::new(23, utc(2026, 2, 16, 14, 40), utc(2026, 2, 17, 15, 30));
    let current = LunarDay::new(23, utc(2026, 2, 16, 14, 40), utc(2026, 2, 17, 15, 30));
    assert_eq!(plan(current, previous), Reconciliation::Unchanged);

    let current = LunarDay::new(24, utc(2026, 2, 17, 15, 30), utc(2026, 2, 18, 16, 20));
    assert_eq!(plan(current, previous), Reconciliation::Unchanged);
}

#[test]
fn test_previous_day_one_is_unchanged() {
    let previous = LunarDay::new(1, utc(2026, 2, 16, 12, 0), utc(2026, 2, 17, 1, 0));
    for number in [1, 2] {
        let current = LunarDay::new(number, utc(2026, 2, 17, 3, 0), utc(2026, 2, 18, 4, 0));
        assert_eq!(plan(current, previous), Reconciliation::Unchanged);
    }
}

#[test]
fn test_empty_inputs_pass_through() {
    let today = vec![LunarDay::new(1, utc(2026, 2, 17, 3, 0), utc(2026, 2, 18, 4, 0))];
    assert_eq!(reconcile(&today, &[], day_start(), two_hours()), today);
    assert!(reconcile(&[], &today, day_start(), two_hours()).is_empty());
}

// ── PrependPrevious ──

#[test]
fn test_day_one_carries_previous_and_bridges_gap() {
    let previous = LunarDay::new(29, utc(2026, 2, 16, 1, 0), utc(2026, 2, 17, 2, 0));
    let current = LunarDay::new(1, utc(2026, 2, 17, 3, 0), utc(2026, 2, 18, 4, 0));
    let bridge = LunarDay::new(30, utc(2026, 2, 17, 2, 0), utc(2026, 2, 17, 3, 0));

    let result = plan(current, previous);
    assert_eq!(
        result,
        Reconciliation::PrependPrevious {
            carried: Some(previous),
            bridge: Some(bridge),
        }
    );
    assert_eq!(result.apply(&[current]), vec![previous, bridge, current]);
}

#[test]
fn test_day_one_carries_previous_without_gap() {
    let previous = LunarDay::new(30, utc(2026, 2, 16, 1, 0), utc(2026, 2, 17, 3, 0));
    let current = LunarDay::new(1, utc(2026, 2, 17, 3, 0), utc(2026, 2, 18, 4, 0));
    assert_eq!(
        plan(current, previous).leading(),
        vec![previous]
    );
}

#[test]
fn test_day_one_bridge_only_when_previous_ended_yesterday() {
    let previous = LunarDay::new(29, utc(2026, 2, 15, 22, 0), utc(2026, 2, 16, 23, 0));
    let current = LunarDay::new(1, utc(2026, 2, 17, 1, 0), utc(2026, 2, 18, 2, 0));
    assert_eq!(
        plan(current, previous),
        Reconciliation::PrependPrevious {
            carried: None,
            bridge: Some(LunarDay::new(
                30,
                utc(2026, 2, 16, 23, 0),
                utc(2026, 2, 17, 1, 0)
            )),
        }
    );
}

#[test]
fn test_day_one_nothing_to_prepend_is_unchanged() {
    let previous = LunarDay::new(29, utc(2026, 2, 15, 19, 0), utc(2026, 2, 16, 20, 0));
    let current = LunarDay::new(1, utc(2026, 2, 16, 22, 0), utc(2026, 2, 17, 5, 0));
    assert_eq!(plan(current, previous), Reconciliation::Unchanged);
}

// ── SynthesizeGap ──

#[test]
fn test_day_two_gap_becomes_day_one() {
    let previous = LunarDay::new(30, utc(2026, 2, 16, 1, 0), utc(2026, 2, 17, 3, 0));
    let current = LunarDay::new(2, utc(2026, 2, 17, 5, 0), utc(2026, 2, 18, 6, 0));
    let day_one = LunarDay::new(1, utc(2026, 2, 17, 3, 0), utc(2026, 2, 17, 5, 0));

    let result = plan(current, previous);
    assert_eq!(
        result,
        Reconciliation::SynthesizeGap {
            carried: Some(previous),
            day_one,
        }
    );
    assert_eq!(result.apply(&[current]), vec![previous, day_one, current]);
}

#[test]
fn test_day_two_gap_same_number_not_carried() {
    let previous = LunarDay::new(2, utc(2026, 2, 16, 1, 0), utc(2026, 2, 17, 3, 0));
    let current = LunarDay::new(2, utc(2026, 2, 17, 5, 0), utc(2026, 2, 18, 6, 0));
    assert_eq!(
        plan(current, previous).leading(),
        vec![LunarDay::new(1, utc(2026, 2, 17, 3, 0), utc(2026, 2, 17, 5, 0))]
    );
}

#[test]
fn test_day_two_gap_before_day_start_is_unchanged() {
    let previous = LunarDay::new(30, utc(2026, 2, 15, 19, 0), utc(2026, 2, 16, 20, 0));
    let current = LunarDay::new(2, utc(2026, 2, 16, 22, 0), utc(2026, 2, 17, 10, 0));
    assert_eq!(plan(current, previous), Reconciliation::Unchanged);
}

// ── SynthesizeFallbackWindow ──

#[test]
fn test_day_two_without_gap_uses_fallback_window() {
    let previous = LunarDay::new(30, utc(2026, 2, 16, 20, 30), utc(2026, 2, 17, 21, 20));
    let current = LunarDay::new(2, utc(2026, 2, 17, 21, 20), utc(2026, 2, 18, 22, 10));
    let trimmed = LunarDay::new(30, utc(2026, 2, 16, 20, 30), utc(2026, 2, 17, 19, 20));
    let day_one = LunarDay::new(1, utc(2026, 2, 17, 19, 20), utc(2026, 2, 17, 21, 20));

    let result = plan(current, previous);
    assert_eq!(
        result,
        Reconciliation::SynthesizeFallbackWindow {
            trimmed: Some(trimmed),
            day_one,
        }
    );
    assert_eq!(day_one.duration(), two_hours());
    assert_eq!(result.apply(&[current]), vec![trimmed, day_one, current]);
}

#[test]
fn test_fallback_drops_previous_shorter_than_window() {
    let previous = LunarDay::new(30, utc(2026, 2, 17, 20, 0), utc(2026, 2, 17, 21, 20));
    let current = LunarDay::new(2, utc(2026, 2, 17, 21, 20), utc(2026, 2, 18, 22, 10));
    assert_eq!(
        plan(current, previous).leading(),
        vec![LunarDay::new(1, utc(2026, 2, 17, 19, 20), utc(2026, 2, 17, 21, 20))]
    );
}

#[test]
fn test_fallback_overlapping_previous() {
    // Day 2 starts before yesterday's last window ends.
    let previous = LunarDay::new(29, utc(2026, 2, 16, 20, 0), utc(2026, 2, 17, 22, 0));
    let current = LunarDay::new(2, utc(2026, 2, 17, 21, 0), utc(2026, 2, 18, 22, 0));
    let leading = plan(current, previous).leading();
    assert_eq!(
        leading,
        vec![
            LunarDay::new(29, utc(2026, 2, 16, 20, 0), utc(2026, 2, 17, 19, 0)),
            LunarDay::new(1, utc(2026, 2, 17, 19, 0), utc(2026, 2, 17, 21, 0)),
        ]
    );
}

#[test]
fn test_fallback_window_before_day_start_is_unchanged() {
    let previous = LunarDay::new(30, utc(2026, 2, 15, 20, 0), utc(2026, 2, 16, 21, 0));
    let current = LunarDay::new(2, utc(2026, 2, 16, 21, 0), utc(2026, 2, 17, 22, 0));
    assert_eq!(plan(current, previous), Reconciliation::Unchanged);
}
