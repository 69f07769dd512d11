//! API client for the shift backend
//!
//! Thin JSON layer over [`HttpClient`]: builds URLs from the configured base,
//! attaches the session's bearer token, classifies failures and closes the
//! session when the backend answers 401. Requests are never retried.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shiftline_core::Session;
use shiftline_domain::{ApiConfig, ShiftlineError};
use tracing::{debug, instrument, warn};

use super::errors::{extract_message, ApiError};
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Backend origin without a trailing slash (e.g. "http://localhost:5000")
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.normalized_base_url().to_string(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }
}

/// JSON API client bound to one session
pub struct ApiClient {
    http_client: Arc<HttpClient>,
    session: Arc<Session>,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(config: ApiClientConfig, session: Arc<Session>) -> Result<Self, ShiftlineError> {
        let http_client = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(concat!("shiftline/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http_client: Arc::new(http_client), session, config })
    }

    /// Session whose token is attached to requests
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http_client.request(Method::GET, self.url(path));
        self.execute(request).await
    }

    /// Execute a GET request with query parameters
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.http_client.request(Method::GET, self.url(path)).query(query);
        self.execute(request).await
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let request = self.http_client.request(Method::POST, self.url(path)).json(body);
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let bearer = self.session.bearer();
        let request = match &bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = self.http_client.send(request).await.map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status, extract_message(&body));
            if status == StatusCode::UNAUTHORIZED && bearer.is_some() {
                warn!("backend rejected the session token; signing out");
                if let Err(clear_err) = self.session.clear() {
                    warn!(error = %clear_err, "failed to discard rejected session token");
                }
            } else {
                debug!(status = status.as_u16(), error = %err, "request rejected");
            }
            return Err(err);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {e}")))?;

        // 204/205 and empty bodies read as JSON null
        if status == StatusCode::NO_CONTENT
            || status == StatusCode::RESET_CONTENT
            || bytes.iter().all(u8::is_ascii_whitespace)
        {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "empty response ({}) where a body was expected",
                    status.as_u16()
                ))
            });
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
    }

    fn map_transport_error(err: ShiftlineError) -> ApiError {
        match err {
            ShiftlineError::MalformedResponse(message) => ApiError::Decode(message),
            ShiftlineError::Network(message) => ApiError::Network(message),
            other => ApiError::Network(other.to_string()),
        }
    }
}
