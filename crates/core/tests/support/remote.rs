//! Mock remote store and position providers
//!
//! `MockBackend` behaves like a tiny single-user backend: it keeps the open
//! shift, records every call, and can be told to fail the next call or to
//! hold mutations until released.

use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use parking_lot::Mutex;
use shiftline_core::{AdminApi, AuthApi, PositionProvider, ShiftApi};
use shiftline_domain::{
    BreakInterval, BreakType, Credentials, Employee, Position, Registration, Result,
    ShiftListPayload, ShiftRecord, ShiftStats, ShiftlineError,
};
use tokio::sync::Semaphore;

/// Unsigned JWT carrying `payload`.
pub fn token_with(payload: &str) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#),
        URL_SAFE_NO_PAD.encode(payload.as_bytes())
    )
}

/// Token for a user with the given role that expires in an hour.
pub fn token_for(role: &str) -> String {
    let exp = Utc::now().timestamp() + 3600;
    token_with(&format!(r#"{{"id":"u1","name":"Ada","email":"ada@example.com","role":"{role}","exp":{exp}}}"#))
}

#[derive(Default)]
pub struct MockBackend {
    open_shift: Mutex<Option<ShiftRecord>>,
    fail_next: Mutex<Option<ShiftlineError>>,
    history: Mutex<Option<ShiftListPayload>>,
    all_shifts: Mutex<Option<ShiftListPayload>>,
    employees: Mutex<Vec<Employee>>,
    stats: Mutex<ShiftStats>,
    stats_error: Mutex<Option<ShiftlineError>>,
    token: Mutex<Option<String>>,
    calls: Mutex<Vec<&'static str>>,
    gate: Option<Arc<Semaphore>>,
    next_id: Mutex<u32>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutations wait for a permit on the returned semaphore.
    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        (Self { gate: Some(gate.clone()), ..Self::default() }, gate)
    }

    pub fn with_open_shift(self, shift: ShiftRecord) -> Self {
        *self.open_shift.lock() = Some(shift);
        self
    }

    pub fn with_history(self, payload: ShiftListPayload) -> Self {
        *self.history.lock() = Some(payload);
        self
    }

    pub fn with_all_shifts(self, payload: ShiftListPayload) -> Self {
        *self.all_shifts.lock() = Some(payload);
        self
    }

    pub fn with_employees(self, employees: Vec<Employee>) -> Self {
        *self.employees.lock() = employees;
        self
    }

    pub fn with_stats(self, stats: ShiftStats) -> Self {
        *self.stats.lock() = stats;
        self
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        *self.token.lock() = Some(token.into());
        self
    }

    pub fn fail_next(&self, error: ShiftlineError) {
        *self.fail_next.lock() = Some(error);
    }

    /// Every stats call fails with `error` from now on.
    pub fn fail_stats(&self, error: ShiftlineError) {
        *self.stats_error.lock() = Some(error);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    pub fn open_shift(&self) -> Option<ShiftRecord> {
        self.open_shift.lock().clone()
    }

    fn record(&self, call: &'static str) -> Result<()> {
        self.calls.lock().push(call);
        match self.fail_next.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
    }

    fn with_open<F>(&self, change: F) -> Result<ShiftRecord>
    where
        F: FnOnce(&mut ShiftRecord),
    {
        let mut open = self.open_shift.lock();
        let shift = open
            .as_mut()
            .ok_or_else(|| ShiftlineError::Remote("No active shift found".to_string()))?;
        change(shift);
        Ok(shift.clone())
    }
}

#[async_trait]
impl ShiftApi for MockBackend {
    async fn fetch_current_shift(&self) -> Result<Option<ShiftRecord>> {
        self.record("fetch_current_shift")?;
        Ok(self.open_shift.lock().clone())
    }

    async fn start_shift(&self, position: Position) -> Result<ShiftRecord> {
        self.record("start_shift")?;
        self.wait_for_gate().await;
        let mut open = self.open_shift.lock();
        if open.is_some() {
            return Err(ShiftlineError::Remote("You already have an active shift".to_string()));
        }
        let id = {
            let mut next_id = self.next_id.lock();
            *next_id += 1;
            *next_id
        };
        let mut shift = ShiftRecord::open(format!("shift-{id}"), Utc::now());
        shift.location = Some(position);
        *open = Some(shift.clone());
        Ok(shift)
    }

    async fn end_shift(&self, position: Position) -> Result<ShiftRecord> {
        self.record("end_shift")?;
        self.wait_for_gate().await;
        let closed = self.with_open(|shift| {
            shift.end_time = Some(Utc::now());
            shift.location = Some(position);
        })?;
        self.open_shift.lock().take();
        Ok(closed)
    }

    async fn start_break(&self, break_type: BreakType, _position: Position) -> Result<ShiftRecord> {
        self.record("start_break")?;
        self.wait_for_gate().await;
        self.with_open(|shift| {
            shift.on_break = true;
            shift.break_type = Some(break_type);
            shift.breaks.push(BreakInterval { start_time: Utc::now(), end_time: None });
        })
    }

    async fn end_break(&self, _position: Position) -> Result<ShiftRecord> {
        self.record("end_break")?;
        self.wait_for_gate().await;
        self.with_open(|shift| {
            shift.on_break = false;
            shift.break_type = None;
            if let Some(open) = shift.breaks.iter_mut().find(|interval| interval.is_open()) {
                open.end_time = Some(Utc::now());
            }
        })
    }

    async fn fetch_history(&self, _page: u32, _limit: u32) -> Result<ShiftListPayload> {
        self.record("fetch_history")?;
        Ok(self.history.lock().clone().unwrap_or(ShiftListPayload::Bare(Vec::new())))
    }

    async fn fetch_stats(&self) -> Result<ShiftStats> {
        self.record("fetch_stats")?;
        if let Some(error) = self.stats_error.lock().clone() {
            return Err(error);
        }
        Ok(*self.stats.lock())
    }
}

#[async_trait]
impl AuthApi for MockBackend {
    async fn authenticate(&self, _credentials: Credentials) -> Result<String> {
        self.record("authenticate")?;
        self.token
            .lock()
            .clone()
            .ok_or_else(|| ShiftlineError::Remote("Invalid credentials".to_string()))
    }

    async fn register(&self, _registration: Registration) -> Result<String> {
        self.record("register")?;
        self.token
            .lock()
            .clone()
            .ok_or_else(|| ShiftlineError::Remote("User already exists".to_string()))
    }
}

#[async_trait]
impl AdminApi for MockBackend {
    async fn fetch_employees(&self) -> Result<Vec<Employee>> {
        self.record("fetch_employees")?;
        Ok(self.employees.lock().clone())
    }

    async fn fetch_all_shifts(&self) -> Result<ShiftListPayload> {
        self.record("fetch_all_shifts")?;
        Ok(self.all_shifts.lock().clone().unwrap_or(ShiftListPayload::Bare(Vec::new())))
    }
}

/// Position provider that always answers with the same fix.
pub struct FixedPosition(pub Position);

impl Default for FixedPosition {
    fn default() -> Self {
        Self(Position::new(52.52, 13.405, 5.0))
    }
}

#[async_trait]
impl PositionProvider for FixedPosition {
    async fn current_position(&self) -> Result<Position> {
        Ok(self.0)
    }
}

/// Position provider that is never available.
pub struct DeniedPosition;

#[async_trait]
impl PositionProvider for DeniedPosition {
    async fn current_position(&self) -> Result<Position> {
        Err(ShiftlineError::PositionUnavailable("User denied Geolocation".to_string()))
    }
}
