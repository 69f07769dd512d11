//! REST implementation of the remote store ports
//!
//! One `HttpRemoteStore` serves the auth, shift and admin ports over a shared
//! [`ApiClient`], so all three see the same session.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shiftline_core::{AdminApi, AuthApi, ShiftApi};
use shiftline_domain::constants::{
    ENDPOINT_ADMIN_EMPLOYEES, ENDPOINT_ADMIN_SHIFTS, ENDPOINT_CURRENT_SHIFT, ENDPOINT_END_BREAK,
    ENDPOINT_END_SHIFT, ENDPOINT_HISTORY, ENDPOINT_LOGIN, ENDPOINT_REGISTER, ENDPOINT_START_BREAK,
    ENDPOINT_START_SHIFT, ENDPOINT_STATS,
};
use shiftline_domain::{
    BreakType, Credentials, Employee, Position, Registration, Result, ShiftListPayload,
    ShiftRecord, ShiftStats, ShiftlineError, TokenResponse,
};
use tracing::{debug, instrument, warn};

use super::client::ApiClient;
use super::errors::ApiError;

/// Read a list-shaped response leniently: an undecodable body is logged and
/// treated as JSON null so the caller degrades it to an empty list.
fn lenient_list(path: &str, result: std::result::Result<Value, ApiError>) -> Result<Value> {
    match result {
        Ok(value) => Ok(value),
        Err(ApiError::Decode(reason)) => {
            warn!(path, %reason, "list response is not JSON; treating as empty");
            Ok(Value::Null)
        }
        Err(err) => Err(err.into()),
    }
}

fn shift_list(value: Value) -> ShiftListPayload {
    serde_json::from_value(value).unwrap_or(ShiftListPayload::Unrecognized(Value::Null))
}

/// Body of the shift start/end and break end requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRequest {
    pub location: Position,
}

/// Body of the break start request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakStartRequest {
    #[serde(rename = "type")]
    pub break_type: BreakType,
    pub location: Position,
}

#[derive(Debug, Serialize)]
struct HistoryQuery {
    page: u32,
    limit: u32,
}

/// Remote store backed by the REST API
pub struct HttpRemoteStore {
    client: Arc<ApiClient>,
}

impl HttpRemoteStore {
    /// Remote store issuing requests through `client`
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn token_from(response: TokenResponse) -> Result<String> {
        if response.token.trim().is_empty() {
            return Err(ShiftlineError::MalformedResponse("response carried an empty token".into()));
        }
        Ok(response.token)
    }

    async fn shift_mutation<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<ShiftRecord> {
        let shift: ShiftRecord = self.client.post(path, body).await?;
        debug!(path, shift_id = %shift.id, on_break = shift.on_break, "shift updated");
        Ok(shift)
    }
}

#[async_trait]
impl AuthApi for HttpRemoteStore {
    #[instrument(skip_all)]
    async fn authenticate(&self, credentials: Credentials) -> Result<String> {
        let response: TokenResponse = self.client.post(ENDPOINT_LOGIN, &credentials).await?;
        Self::token_from(response)
    }

    #[instrument(skip_all)]
    async fn register(&self, registration: Registration) -> Result<String> {
        let response: TokenResponse = self.client.post(ENDPOINT_REGISTER, &registration).await?;
        Self::token_from(response)
    }
}

#[async_trait]
impl ShiftApi for HttpRemoteStore {
    async fn fetch_current_shift(&self) -> Result<Option<ShiftRecord>> {
        Ok(self.client.get(ENDPOINT_CURRENT_SHIFT).await?)
    }

    async fn start_shift(&self, position: Position) -> Result<ShiftRecord> {
        self.shift_mutation(ENDPOINT_START_SHIFT, &LocationRequest { location: position }).await
    }

    async fn end_shift(&self, position: Position) -> Result<ShiftRecord> {
        self.shift_mutation(ENDPOINT_END_SHIFT, &LocationRequest { location: position }).await
    }

    async fn start_break(&self, break_type: BreakType, position: Position) -> Result<ShiftRecord> {
        self.shift_mutation(
            ENDPOINT_START_BREAK,
            &BreakStartRequest { break_type, location: position },
        )
        .await
    }

    async fn end_break(&self, position: Position) -> Result<ShiftRecord> {
        self.shift_mutation(ENDPOINT_END_BREAK, &LocationRequest { location: position }).await
    }

    async fn fetch_history(&self, page: u32, limit: u32) -> Result<ShiftListPayload> {
        let result = self.client.get_with_query(ENDPOINT_HISTORY, &HistoryQuery { page, limit }).await;
        lenient_list(ENDPOINT_HISTORY, result).map(shift_list)
    }

    async fn fetch_stats(&self) -> Result<ShiftStats> {
        Ok(self.client.get(ENDPOINT_STATS).await?)
    }
}

#[async_trait]
impl AdminApi for HttpRemoteStore {
    async fn fetch_employees(&self) -> Result<Vec<Employee>> {
        let result = self.client.get(ENDPOINT_ADMIN_EMPLOYEES).await;
        let payload = lenient_list(ENDPOINT_ADMIN_EMPLOYEES, result)?;
        if !payload.is_array() {
            warn!("employee listing is not an array; treating as empty");
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(payload).unwrap_or_else(|err| {
            warn!(error = %err, "employee listing has invalid entries; treating as empty");
            Vec::new()
        }))
    }

    async fn fetch_all_shifts(&self) -> Result<ShiftListPayload> {
        let result = self.client.get(ENDPOINT_ADMIN_SHIFTS).await;
        lenient_list(ENDPOINT_ADMIN_SHIFTS, result).map(shift_list)
    }
}
