//! Shift state machine
//!
//! The tracker never mutates its state directly: every request and every
//! completion is expressed as a [`ShiftEvent`] and folded through
//! [`transition`], a pure function that is tested without any I/O.

use serde::Serialize;
use shiftline_domain::constants::{
    MSG_END_BREAK_FAILED, MSG_END_SHIFT_FAILED, MSG_FETCH_CURRENT_SHIFT_FAILED,
    MSG_FETCH_HISTORY_FAILED, MSG_FETCH_STATS_FAILED, MSG_START_BREAK_FAILED,
    MSG_START_SHIFT_FAILED,
};
use shiftline_domain::{
    BreakType, HistoryPage, Result, ShiftRecord, ShiftStats, ShiftStatus, ShiftlineError,
};

/// Remote operation issued by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operation {
    LoadCurrentShift,
    StartShift,
    EndShift,
    StartBreak,
    EndBreak,
    FetchHistory,
    FetchStats,
}

impl Operation {
    /// Message shown when a failure carries no user-facing text.
    #[must_use]
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::LoadCurrentShift => MSG_FETCH_CURRENT_SHIFT_FAILED,
            Self::StartShift => MSG_START_SHIFT_FAILED,
            Self::EndShift => MSG_END_SHIFT_FAILED,
            Self::StartBreak => MSG_START_BREAK_FAILED,
            Self::EndBreak => MSG_END_BREAK_FAILED,
            Self::FetchHistory => MSG_FETCH_HISTORY_FAILED,
            Self::FetchStats => MSG_FETCH_STATS_FAILED,
        }
    }

    /// Operations that change the shift on the backend.
    #[must_use]
    pub fn is_mutation(self) -> bool {
        matches!(self, Self::StartShift | Self::EndShift | Self::StartBreak | Self::EndBreak)
    }

    /// Stable snake_case name used in logs and precondition messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::LoadCurrentShift => "load_current_shift",
            Self::StartShift => "start_shift",
            Self::EndShift => "end_shift",
            Self::StartBreak => "start_break",
            Self::EndBreak => "end_break",
            Self::FetchHistory => "fetch_history",
            Self::FetchStats => "fetch_stats",
        }
    }
}

/// Everything the tracker knows about the user's shifts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ShiftState {
    pub current_shift: Option<ShiftRecord>,
    pub status: ShiftStatus,
    /// Only set while `status` is `Break`.
    pub break_type: Option<BreakType>,
    pub history: HistoryPage,
    pub stats: ShiftStats,
    pub is_loading: bool,
    /// Last displayable error message.
    pub error: Option<String>,
    /// Requests issued but not yet settled.
    #[serde(skip)]
    pub pending: u32,
}

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum ShiftEvent {
    Requested(Operation),
    CurrentShiftLoaded(Option<ShiftRecord>),
    ShiftStarted(ShiftRecord),
    ShiftEnded(ShiftRecord),
    BreakStarted { shift: ShiftRecord, break_type: BreakType },
    BreakEnded(ShiftRecord),
    HistoryLoaded(HistoryPage),
    StatsLoaded(ShiftStats),
    Failed(String),
    /// The caller dropped the request before it completed.
    Abandoned(Operation),
}

/// Fold one event into the state.
///
/// `Requested` opens a pending request; every other event settles one.
/// `is_loading` stays set while any request is still pending.
#[must_use]
pub fn transition(state: ShiftState, event: ShiftEvent) -> ShiftState {
    let state = match event {
        ShiftEvent::Requested(_) => {
            return ShiftState {
                pending: state.pending.saturating_add(1),
                is_loading: true,
                error: None,
                ..state
            };
        }
        _ => {
            let pending = state.pending.saturating_sub(1);
            ShiftState { pending, is_loading: pending > 0, ..state }
        }
    };

    match event {
        ShiftEvent::Requested(_) => state,
        ShiftEvent::CurrentShiftLoaded(shift) => {
            let status = ShiftStatus::of(shift.as_ref());
            let break_type = match status {
                ShiftStatus::Break => shift.as_ref().and_then(|s| s.break_type),
                ShiftStatus::Active | ShiftStatus::Inactive => None,
            };
            ShiftState { current_shift: shift, status, break_type, ..state }
        }
        ShiftEvent::ShiftStarted(shift) => ShiftState {
            current_shift: Some(shift),
            status: ShiftStatus::Active,
            break_type: None,
            ..state
        },
        ShiftEvent::ShiftEnded(shift) => ShiftState {
            current_shift: Some(shift),
            status: ShiftStatus::Inactive,
            break_type: None,
            ..state
        },
        ShiftEvent::BreakStarted { shift, break_type } => ShiftState {
            current_shift: Some(shift),
            status: ShiftStatus::Break,
            break_type: Some(break_type),
            ..state
        },
        ShiftEvent::BreakEnded(shift) => ShiftState {
            current_shift: Some(shift),
            status: ShiftStatus::Active,
            break_type: None,
            ..state
        },
        ShiftEvent::HistoryLoaded(history) => ShiftState { history, ..state },
        ShiftEvent::StatsLoaded(stats) => ShiftState { stats, ..state },
        ShiftEvent::Failed(message) => ShiftState { error: Some(message), ..state },
        ShiftEvent::Abandoned(_) => state,
    }
}

/// Check that `operation` may be issued from `state`.
///
/// # Errors
/// Returns `ShiftlineError::InvalidTransition` when the status does not allow
/// the operation or another request is still outstanding.
pub fn check_precondition(state: &ShiftState, operation: Operation) -> Result<()> {
    if state.is_loading && operation.is_mutation() {
        return Err(ShiftlineError::InvalidTransition(
            shiftline_domain::constants::MSG_REQUEST_IN_PROGRESS.to_string(),
        ));
    }

    let allowed = match operation {
        Operation::StartShift => state.status == ShiftStatus::Inactive,
        // Ending from a break is tolerated; the backend decides what happens
        // to the open break.
        Operation::EndShift => matches!(state.status, ShiftStatus::Active | ShiftStatus::Break),
        Operation::StartBreak => state.status == ShiftStatus::Active,
        Operation::EndBreak => state.status == ShiftStatus::Break,
        Operation::LoadCurrentShift | Operation::FetchHistory | Operation::FetchStats => true,
    };

    if allowed {
        Ok(())
    } else {
        Err(ShiftlineError::InvalidTransition(format!(
            "cannot {} while status is {}",
            operation.name().replace('_', " "),
            state.status
        )))
    }
}
