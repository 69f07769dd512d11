//! The signed-in session
//!
//! One `Session` is shared by the auth service, which opens and closes it,
//! and the HTTP client, which reads the bearer token and closes the session
//! when the backend answers 401.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shiftline_domain::{Claims, Result, ShiftlineError};
use tracing::{debug, info, warn};

use super::claims::decode_claims;
use super::ports::TokenStore;

#[derive(Debug, Clone)]
struct Active {
    token: String,
    claims: Claims,
}

/// Current token and its decoded claims, backed by a [`TokenStore`].
pub struct Session {
    store: Arc<dyn TokenStore>,
    active: RwLock<Option<Active>>,
}

impl Session {
    /// Create a signed-out session over `store`. Nothing is loaded until
    /// [`Session::restore`] is called.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store, active: RwLock::new(None) }
    }

    /// Adopt a freshly issued token and persist it.
    ///
    /// # Errors
    /// `Auth` when the token cannot be decoded or is already expired;
    /// `Storage` when it cannot be persisted.
    pub fn establish(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        let claims = decode_claims(token)?;
        if claims.is_expired(now) {
            return Err(ShiftlineError::Auth("session token has already expired".to_string()));
        }

        self.store.save(token)?;
        *self.active.write() = Some(Active { token: token.to_string(), claims: claims.clone() });
        info!(user_id = claims.user_id().unwrap_or("unknown"), role = ?claims.role, "session established");
        Ok(claims)
    }

    /// Reload the persisted token.
    ///
    /// Undecodable or expired tokens are discarded and the session stays
    /// signed out.
    ///
    /// # Errors
    /// `Storage` when the store cannot be read or cleared.
    pub fn restore(&self, now: DateTime<Utc>) -> Result<Option<Claims>> {
        let Some(token) = self.store.load()? else {
            debug!("no persisted session token");
            return Ok(None);
        };

        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(err) => {
                warn!(error = %err, "discarding unreadable session token");
                self.clear()?;
                return Ok(None);
            }
        };

        if claims.is_expired(now) {
            info!(expired_at = ?claims.expires_at(), "persisted session token expired");
            self.clear()?;
            return Ok(None);
        }

        *self.active.write() = Some(Active { token, claims: claims.clone() });
        debug!(user_id = claims.user_id().unwrap_or("unknown"), "session restored");
        Ok(Some(claims))
    }

    /// Token for the `Authorization` header.
    pub fn bearer(&self) -> Option<String> {
        self.active.read().as_ref().map(|active| active.token.clone())
    }

    pub fn claims(&self) -> Option<Claims> {
        self.active.read().as_ref().map(|active| active.claims.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.active.read().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.active.read().as_ref().is_some_and(|active| active.claims.is_admin())
    }

    /// Sign out: forget the token in memory and in the store.
    ///
    /// # Errors
    /// `Storage` when the store cannot be cleared; the in-memory session is
    /// dropped regardless.
    pub fn clear(&self) -> Result<()> {
        self.active.write().take();
        self.store.clear()
    }

    /// Sign out if the held token has expired by `now`. Returns whether the
    /// session was dropped.
    pub fn expire_if_needed(&self, now: DateTime<Utc>) -> bool {
        let expired = self.active.read().as_ref().is_some_and(|active| active.claims.is_expired(now));
        if expired {
            info!("session token expired; signing out");
            if let Err(err) = self.clear() {
                warn!(error = %err, "failed to clear expired session token");
            }
        }
        expired
    }
}
