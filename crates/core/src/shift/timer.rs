//! Live timer readings derived from held state
//!
//! A reading performs no I/O; callers drive it from whatever ticking
//! primitive they have (the CLI uses `tokio::time::interval`).

use chrono::{DateTime, Duration, Utc};
use shiftline_domain::{BreakType, ShiftStatus};

use super::duration::{break_duration, working_duration};
use super::state::ShiftState;

/// Snapshot of the figures a timer display needs at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerReading {
    pub status: ShiftStatus,
    pub break_type: Option<BreakType>,
    pub working: Duration,
    pub breaks: Duration,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl TimerReading {
    /// Compute the reading for `state` at `now`.
    pub fn at(state: &ShiftState, now: DateTime<Utc>) -> Self {
        match &state.current_shift {
            Some(shift) => Self {
                status: state.status,
                break_type: state.break_type,
                working: working_duration(shift, now),
                breaks: break_duration(shift, now),
                started_at: Some(shift.start_time),
                ended_at: shift.end_time,
            },
            None => Self {
                status: state.status,
                break_type: None,
                working: Duration::zero(),
                breaks: Duration::zero(),
                started_at: None,
                ended_at: None,
            },
        }
    }

    /// Label for the status line ("Working", "Lunch Break", ...).
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        match (self.status, self.break_type) {
            (ShiftStatus::Active, _) => "Working",
            (ShiftStatus::Break, Some(break_type)) => break_type.label(),
            (ShiftStatus::Break, None) => "On Break",
            (ShiftStatus::Inactive, _) => "Not Working",
        }
    }
}
