//! Port interfaces for shift tracking
//!
//! These traits define the boundaries between the tracker and the
//! infrastructure that talks to the backend or the device.

use async_trait::async_trait;
use shiftline_domain::{BreakType, Position, Result, ShiftListPayload, ShiftRecord, ShiftStats};

/// Remote shift operations for the signed-in user
#[async_trait]
pub trait ShiftApi: Send + Sync {
    /// The user's open shift, or `None` when there is none.
    async fn fetch_current_shift(&self) -> Result<Option<ShiftRecord>>;

    /// Open a shift at `position`; returns the new record.
    async fn start_shift(&self, position: Position) -> Result<ShiftRecord>;

    /// Close the open shift at `position`.
    async fn end_shift(&self, position: Position) -> Result<ShiftRecord>;

    /// Open a break of `break_type` on the current shift.
    async fn start_break(&self, break_type: BreakType, position: Position) -> Result<ShiftRecord>;

    /// Close the open break.
    async fn end_break(&self, position: Position) -> Result<ShiftRecord>;

    /// One page of closed shifts, in whatever shape the backend chose.
    async fn fetch_history(&self, page: u32, limit: u32) -> Result<ShiftListPayload>;

    /// Hour totals for today, this week and this month.
    async fn fetch_stats(&self) -> Result<ShiftStats>;
}

/// Capability to acquire the device's current geographic position
///
/// Implementations fail with `ShiftlineError::PositionUnavailable` when
/// permission is denied, the capability is absent, or acquisition times out.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    /// Acquire one position fix.
    async fn current_position(&self) -> Result<Position>;
}
