//! Domain types and models
//!
//! Wire-compatible with the shift backend: camelCase JSON, Mongo-style `_id`
//! identifiers, RFC 3339 timestamps.

pub mod history;
pub mod shift;
pub mod user;

pub use history::{HistoryPage, ShiftListPayload, ShiftStats};
pub use shift::{BreakInterval, BreakType, Position, ShiftRecord, ShiftStatus};
pub use user::{Claims, Credentials, Employee, Registration, Role, TokenResponse};
