//! Shift tracking domain

pub mod duration;
pub mod ports;
pub mod service;
pub mod state;
pub mod timer;

pub use ports::*;
pub use service::ShiftTracker;
pub use state::{check_precondition, transition, Operation, ShiftEvent, ShiftState};
pub use timer::TimerReading;
