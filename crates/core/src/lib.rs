//! # Shiftline Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the remote store, position
//!   acquisition and token persistence
//! - The shift state machine, duration maths and the shift tracker
//! - Authentication, session and admin services
//!
//! ## Architecture Principles
//! - Only depends on `shiftline-domain`
//! - No HTTP, filesystem or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod admin;
pub mod auth;
pub mod history;
pub mod shift;

// Re-export specific items to avoid ambiguity
pub use admin::{AdminApi, AdminOverview, AdminService};
pub use auth::{decode_claims, AuthApi, AuthService, InMemoryTokenStore, Session, TokenStore};
pub use history::{normalize_shift_list, shifts_of};
pub use shift::{
    PositionProvider, ShiftApi, ShiftEvent, ShiftState, ShiftTracker, TimerReading,
};
