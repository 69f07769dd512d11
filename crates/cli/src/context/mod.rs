//! Application context - dependency injection container

use std::sync::Arc;

use shiftline_core::{AdminService, AuthService, Session, ShiftTracker, TokenStore};
use shiftline_domain::{Config, Result};
use shiftline_infra::{position, ApiClient, ApiClientConfig, FileTokenStore, HttpRemoteStore};
use tracing::debug;

/// Application context - holds all services and dependencies
///
/// The auth, shift and admin services share one session, so a 401 seen by
/// any of them signs all of them out.
pub struct AppContext {
    pub config: Config,
    pub session: Arc<Session>,
    pub auth: Arc<AuthService>,
    pub tracker: Arc<ShiftTracker>,
    pub admin: Arc<AdminService>,
}

impl AppContext {
    /// Wire the services with the file-backed token store.
    ///
    /// # Errors
    /// `Storage` when no token location can be determined; `Config` when the
    /// HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let store = FileTokenStore::from_config(&config.session)?;
        debug!(token_path = %store.path().display(), "using file token store");
        Self::with_token_store(config, Arc::new(store))
    }

    /// Wire the services around an explicit token store.
    ///
    /// # Errors
    /// `Config` when the HTTP client cannot be built.
    pub fn with_token_store(config: Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        let session = Arc::new(Session::new(store));
        let client = ApiClient::new(ApiClientConfig::from(&config.api), session.clone())?;
        let remote = Arc::new(HttpRemoteStore::new(Arc::new(client)));

        let auth = Arc::new(AuthService::new(remote.clone(), session.clone()));
        let tracker =
            Arc::new(ShiftTracker::new(remote.clone(), position::from_config(&config.position)));
        let admin = Arc::new(AdminService::new(remote, session.clone()));

        debug!(base_url = %config.api.normalized_base_url(), "application context ready");
        Ok(Self { config, session, auth, tracker, admin })
    }
}
