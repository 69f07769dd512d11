//! Shift tracker - the single owner of shift state

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shiftline_domain::{BreakType, HistoryPage, Result, ShiftStats, ShiftStatus, ShiftlineError};
use tracing::{debug, info, warn};

use super::ports::{PositionProvider, ShiftApi};
use super::state::{check_precondition, transition, Operation, ShiftEvent, ShiftState};
use super::timer::TimerReading;
use crate::history::normalize_shift_list;

/// Tracks the signed-in user's shift and issues remote shift operations.
///
/// State is only changed through [`transition`]. The lock is never held
/// across a remote call: a request is registered, the lock released, the call
/// awaited, and the outcome folded back in. A request whose future is dropped
/// before completion is settled when its request guard drops.
pub struct ShiftTracker {
    api: Arc<dyn ShiftApi>,
    position: Arc<dyn PositionProvider>,
    state: RwLock<ShiftState>,
}

fn fold(lock: &RwLock<ShiftState>, event: ShiftEvent) -> ShiftState {
    let mut state = lock.write();
    let current = std::mem::take(&mut *state);
    *state = transition(current, event);
    state.clone()
}

/// One registered request. Settles itself with `Abandoned` when dropped
/// without a completion event.
struct InFlight<'a> {
    state: &'a RwLock<ShiftState>,
    operation: Operation,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, event: ShiftEvent) -> ShiftState {
        self.settled = true;
        fold(self.state, event)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            debug!(operation = self.operation.name(), "request dropped before completion");
            fold(self.state, ShiftEvent::Abandoned(self.operation));
        }
    }
}

impl ShiftTracker {
    /// Create a tracker with empty (INACTIVE) state
    pub fn new(api: Arc<dyn ShiftApi>, position: Arc<dyn PositionProvider>) -> Self {
        Self { api, position, state: RwLock::new(ShiftState::default()) }
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> ShiftState {
        self.state.read().clone()
    }

    /// Derived status of the held shift
    #[must_use]
    pub fn status(&self) -> ShiftStatus {
        self.state.read().status
    }

    /// Timer figures at `now`; no I/O.
    #[must_use]
    pub fn reading(&self, now: DateTime<Utc>) -> TimerReading {
        TimerReading::at(&self.state.read(), now)
    }

    /// Fetch the user's open shift, if any, and derive status from it.
    ///
    /// # Errors
    /// Network or auth failures from the remote store.
    pub async fn load_current_shift(&self) -> Result<ShiftStatus> {
        let request = self.begin(Operation::LoadCurrentShift)?;
        match self.api.fetch_current_shift().await {
            Ok(shift) => {
                let state = request.settle(ShiftEvent::CurrentShiftLoaded(shift));
                debug!(status = %state.status, "current shift loaded");
                Ok(state.status)
            }
            Err(err) => Err(Self::fail(request, err)),
        }
    }

    /// Start a shift at the current position.
    ///
    /// # Errors
    /// `InvalidTransition` unless INACTIVE; `PositionUnavailable`; remote
    /// rejections. State is unchanged apart from the recorded error.
    pub async fn start_shift(&self) -> Result<ShiftState> {
        let operation = Operation::StartShift;
        let request = self.begin(operation)?;

        let outcome = async {
            let position = self.position.current_position().await?;
            self.api.start_shift(position).await
        }
        .await;

        match outcome {
            Ok(shift) => {
                info!(shift_id = %shift.id, "shift started");
                request.settle(ShiftEvent::ShiftStarted(shift));
                self.refresh_stats_quietly().await;
                Ok(self.snapshot())
            }
            Err(err) => Err(Self::fail(request, err)),
        }
    }

    /// End the current shift at the current position.
    ///
    /// An open break is not closed first; the request is forwarded as-is and
    /// the backend's verdict is surfaced.
    ///
    /// # Errors
    /// `InvalidTransition` when INACTIVE; `PositionUnavailable`; remote
    /// rejections.
    pub async fn end_shift(&self) -> Result<ShiftState> {
        let operation = Operation::EndShift;
        let on_break = self.status() == ShiftStatus::Break;
        let request = self.begin(operation)?;
        if on_break {
            warn!("ending shift while a break is still open");
        }

        let outcome = async {
            let position = self.position.current_position().await?;
            self.api.end_shift(position).await
        }
        .await;

        match outcome {
            Ok(shift) => {
                info!(shift_id = %shift.id, "shift ended");
                request.settle(ShiftEvent::ShiftEnded(shift));
                self.refresh_stats_quietly().await;
                Ok(self.snapshot())
            }
            Err(err) => Err(Self::fail(request, err)),
        }
    }

    /// Start a break of the given type.
    ///
    /// # Errors
    /// `InvalidTransition` unless ACTIVE; `PositionUnavailable`; remote
    /// rejections.
    pub async fn start_break(&self, break_type: BreakType) -> Result<ShiftState> {
        let operation = Operation::StartBreak;
        let request = self.begin(operation)?;

        let outcome = async {
            let position = self.position.current_position().await?;
            self.api.start_break(break_type, position).await
        }
        .await;

        match outcome {
            Ok(shift) => {
                info!(shift_id = %shift.id, break_type = %break_type, "break started");
                Ok(request.settle(ShiftEvent::BreakStarted { shift, break_type }))
            }
            Err(err) => Err(Self::fail(request, err)),
        }
    }

    /// End the open break.
    ///
    /// # Errors
    /// `InvalidTransition` unless on BREAK; `PositionUnavailable`; remote
    /// rejections.
    pub async fn end_break(&self) -> Result<ShiftState> {
        let operation = Operation::EndBreak;
        let request = self.begin(operation)?;

        let outcome = async {
            let position = self.position.current_position().await?;
            self.api.end_break(position).await
        }
        .await;

        match outcome {
            Ok(shift) => {
                info!(shift_id = %shift.id, "break ended");
                Ok(request.settle(ShiftEvent::BreakEnded(shift)))
            }
            Err(err) => Err(Self::fail(request, err)),
        }
    }

    /// Fetch one page of shift history.
    ///
    /// Malformed payloads become an empty page rather than an error.
    ///
    /// # Errors
    /// `Validation` for a zero page or page size; remote failures.
    pub async fn fetch_history(&self, page: u32, page_size: u32) -> Result<HistoryPage> {
        if page == 0 || page_size == 0 {
            return Err(ShiftlineError::Validation(
                "page and page size must be at least 1".to_string(),
            ));
        }

        let request = self.begin(Operation::FetchHistory)?;
        match self.api.fetch_history(page, page_size).await {
            Ok(payload) => {
                let history = normalize_shift_list(payload, page);
                debug!(page, pages = history.pages, count = history.shifts.len(), "history loaded");
                request.settle(ShiftEvent::HistoryLoaded(history.clone()));
                Ok(history)
            }
            Err(err) => Err(Self::fail(request, err)),
        }
    }

    /// Fetch aggregate hour totals.
    ///
    /// # Errors
    /// Remote failures.
    pub async fn fetch_stats(&self) -> Result<ShiftStats> {
        let request = self.begin(Operation::FetchStats)?;
        match self.api.fetch_stats().await {
            Ok(stats) => {
                request.settle(ShiftEvent::StatsLoaded(stats));
                Ok(stats)
            }
            Err(err) => Err(Self::fail(request, err)),
        }
    }

    /// Reload the open shift, then the statistics.
    ///
    /// The stats step is best-effort: its failure is recorded in `error` but
    /// the freshly loaded shift is still returned.
    ///
    /// # Errors
    /// Failures loading the open shift.
    pub async fn refresh(&self) -> Result<ShiftState> {
        self.load_current_shift().await?;
        self.refresh_stats_quietly().await;
        Ok(self.snapshot())
    }

    fn begin(&self, operation: Operation) -> Result<InFlight<'_>> {
        let mut state = self.state.write();
        if let Err(err) = check_precondition(&state, operation) {
            debug!(operation = operation.name(), status = %state.status, "operation rejected");
            return Err(err);
        }
        let current = std::mem::take(&mut *state);
        *state = transition(current, ShiftEvent::Requested(operation));
        Ok(InFlight { state: &self.state, operation, settled: false })
    }

    fn fail(request: InFlight<'_>, err: ShiftlineError) -> ShiftlineError {
        let operation = request.operation;
        let message = err.display_message(operation.fallback_message());
        warn!(
            operation = operation.name(),
            error_kind = err.label(),
            error = %err,
            "shift operation failed"
        );
        request.settle(ShiftEvent::Failed(message));
        err
    }

    async fn refresh_stats_quietly(&self) {
        if let Err(err) = self.fetch_stats().await {
            debug!(error = %err, "stats refresh failed");
        }
    }
}
