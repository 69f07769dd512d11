//! # Shiftline Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client and the REST remote store
//! - File-backed session token storage
//! - Configured position providers
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `shiftline-core`
//! - Depends on `shiftline-domain` and `shiftline-core`
//! - Contains all "impure" code (network and filesystem I/O)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod position;
pub mod session;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientConfig, ApiError, ApiErrorCategory, HttpRemoteStore};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use position::{StaticPositionProvider, UnavailablePositionProvider};
pub use session::FileTokenStore;
