//! Shared test helpers for `shiftline-core` integration tests.
//!
//! In-memory stand-ins for the remote store and the position provider so
//! tracker, auth and admin tests can focus on behaviour instead of
//! boilerplate.

#![allow(dead_code)]

pub mod remote;

pub use remote::*;
