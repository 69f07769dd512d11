//! Worked-time arithmetic over shifts and their breaks
//!
//! Open intervals (shift or break without an end) are measured up to `now`,
//! so every figure here is live and must be recomputed on each tick.

use chrono::{DateTime, Duration, Utc};
use shiftline_domain::{BreakInterval, ShiftRecord};

fn interval_length(start: DateTime<Utc>, end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Duration {
    end.unwrap_or(now) - start
}

/// Wall-clock span of the shift, breaks included.
#[must_use]
pub fn elapsed_duration(shift: &ShiftRecord, now: DateTime<Utc>) -> Duration {
    interval_length(shift.start_time, shift.end_time, now)
}

/// Length of a single break interval.
#[must_use]
pub fn interval_duration(interval: &BreakInterval, now: DateTime<Utc>) -> Duration {
    interval_length(interval.start_time, interval.end_time, now)
}

/// Total time spent on breaks; zero when there are none.
#[must_use]
pub fn break_duration(shift: &ShiftRecord, now: DateTime<Utc>) -> Duration {
    shift
        .breaks
        .iter()
        .fold(Duration::zero(), |total, interval| total + interval_duration(interval, now))
}

/// Worked time: elapsed time minus every break.
///
/// Not clamped; a break recorded outside the shift bounds can make the result
/// negative.
#[must_use]
pub fn working_duration(shift: &ShiftRecord, now: DateTime<Utc>) -> Duration {
    elapsed_duration(shift, now) - break_duration(shift, now)
}

fn split_seconds(duration: Duration) -> (&'static str, i64) {
    let millis = duration.num_milliseconds();
    if millis < 0 {
        ("-", (millis.unsigned_abs() / 1000) as i64)
    } else {
        ("", millis / 1000)
    }
}

/// `"{h}h {m}m {s}s"`, rounded down to whole seconds.
#[must_use]
pub fn format_clock(duration: Duration) -> String {
    let (sign, total_secs) = split_seconds(duration);
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{sign}{hours}h {minutes}m {seconds}s")
}

/// `"{h}h {m}m"`, rounded down to whole minutes.
#[must_use]
pub fn format_hours_minutes(duration: Duration) -> String {
    let (sign, total_secs) = split_seconds(duration);
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    format!("{sign}{hours}h {minutes}m")
}

/// Fractional hours with two decimals, as used for aggregate totals.
#[must_use]
pub fn format_hours(hours: f64) -> String {
    if hours.is_finite() {
        format!("{hours:.2}")
    } else {
        "0.00".to_string()
    }
}
