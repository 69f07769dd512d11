//! REST API client for the shift backend
//!
//! # Architecture
//!
//! - Uses [`crate::http::HttpClient`] (no direct reqwest in callers)
//! - Bearer token read from the shared `Session`; a 401 signs the session out
//! - Backend `message` fields are surfaced verbatim
//! - No retries and no background work

pub mod client;
pub mod errors;
pub mod remote_store;

pub use client::{ApiClient, ApiClientConfig};
pub use errors::{ApiError, ApiErrorCategory};
pub use remote_store::HttpRemoteStore;
