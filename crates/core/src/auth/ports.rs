//! Port interfaces for authentication
//!
//! The remote side issues tokens; the token store keeps the last one across
//! process restarts.

use async_trait::async_trait;
use shiftline_domain::{Credentials, Registration, Result};

/// Remote authentication endpoints
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a session token.
    async fn authenticate(&self, credentials: Credentials) -> Result<String>;

    /// Create an account and return its session token.
    async fn register(&self, registration: Registration) -> Result<String>;
}

/// Persistence for the session token
///
/// Calls are synchronous and short; implementations must not block on the
/// network.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, token: &str) -> Result<()>;

    /// Remove the persisted token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}
