//! Shared helpers for `shiftline-infra` integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use shiftline_core::{InMemoryTokenStore, Session};
use shiftline_infra::{ApiClient, ApiClientConfig, HttpRemoteStore};
use wiremock::MockServer;

/// Unsigned JWT for a user with `role` that expires in an hour.
pub fn token_for(role: &str) -> String {
    let exp = Utc::now().timestamp() + 3600;
    let payload = format!(r#"{{"id":"u1","name":"Ada","email":"ada@example.com","role":"{role}","exp":{exp}}}"#);
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload.as_bytes())
    )
}

/// Remote store against a mock server, plus the session and token store
/// behind it.
pub struct TestStack {
    pub server: MockServer,
    pub store: Arc<InMemoryTokenStore>,
    pub session: Arc<Session>,
    pub remote: Arc<HttpRemoteStore>,
}

impl TestStack {
    /// Signed out.
    pub async fn new() -> Self {
        Self::with_store(InMemoryTokenStore::new()).await
    }

    /// Signed in with a token for `role`.
    pub async fn signed_in(role: &str) -> Self {
        let stack = Self::with_store(InMemoryTokenStore::with_token(token_for(role))).await;
        stack.session.restore(Utc::now()).expect("restore session");
        stack
    }

    async fn with_store(store: InMemoryTokenStore) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(store);
        let session = Arc::new(Session::new(store.clone()));
        let config = ApiClientConfig { base_url: server.uri(), ..Default::default() };
        let client = ApiClient::new(config, session.clone()).expect("api client");
        let remote = Arc::new(HttpRemoteStore::new(Arc::new(client)));
        Self { server, store, session, remote }
    }
}
