//! Authentication service - login, registration and session lifecycle

use std::sync::Arc;

use chrono::Utc;
use shiftline_domain::constants::{MSG_ADMIN_REQUIRED, MSG_NOT_AUTHENTICATED};
use shiftline_domain::{Claims, Result, ShiftlineError};
use tracing::{info, warn};

use super::ports::AuthApi;
use super::session::Session;
use super::validation;

/// Signs users in and out against the remote store.
///
/// Errors are returned unchanged; callers render them with
/// `display_message` and the login or registration fallback text.
pub struct AuthService {
    api: Arc<dyn AuthApi>,
    session: Arc<Session>,
}

impl AuthService {
    pub fn new(api: Arc<dyn AuthApi>, session: Arc<Session>) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Validate the form, authenticate and open a session.
    ///
    /// # Errors
    /// `Validation` before any request; remote rejections; `Auth` when the
    /// issued token cannot be decoded.
    pub async fn login(&self, email: &str, password: &str) -> Result<Claims> {
        let credentials = validation::login_credentials(email, password)?;
        let token = self.api.authenticate(credentials).await.inspect_err(|err| {
            warn!(error_kind = err.label(), error = %err, "login rejected");
        })?;
        let claims = self.session.establish(&token, Utc::now())?;
        info!(user_id = claims.user_id().unwrap_or("unknown"), "logged in");
        Ok(claims)
    }

    /// Validate the form, create the account and open a session for it.
    ///
    /// # Errors
    /// `Validation` before any request; remote rejections; `Auth` when the
    /// issued token cannot be decoded.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<Claims> {
        let registration = validation::registration(name, email, password, confirm)?;
        let token = self.api.register(registration).await.inspect_err(|err| {
            warn!(error_kind = err.label(), error = %err, "registration rejected");
        })?;
        let claims = self.session.establish(&token, Utc::now())?;
        info!(user_id = claims.user_id().unwrap_or("unknown"), "registered");
        Ok(claims)
    }

    /// Sign out locally. The backend keeps no session to revoke.
    ///
    /// # Errors
    /// `Storage` when the persisted token cannot be removed.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()?;
        info!("logged out");
        Ok(())
    }

    /// Reopen the persisted session, if it is still valid.
    ///
    /// # Errors
    /// `Storage` when the token store fails.
    pub fn restore(&self) -> Result<Option<Claims>> {
        self.session.restore(Utc::now())
    }

    /// Claims of the signed-in user, after dropping an expired session.
    pub fn current_user(&self) -> Option<Claims> {
        self.session.expire_if_needed(Utc::now());
        self.session.claims()
    }

    /// # Errors
    /// `Auth` when signed out.
    pub fn require_user(&self) -> Result<Claims> {
        self.current_user().ok_or_else(|| ShiftlineError::Auth(MSG_NOT_AUTHENTICATED.to_string()))
    }

    /// # Errors
    /// `Auth("Administrator access required")` unless an admin is signed in.
    pub fn require_admin(&self) -> Result<Claims> {
        match self.current_user() {
            Some(claims) if claims.is_admin() => Ok(claims),
            _ => Err(ShiftlineError::Auth(MSG_ADMIN_REQUIRED.to_string())),
        }
    }
}
