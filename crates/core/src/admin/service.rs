//! Admin service - employee and shift listings for administrators

use std::sync::Arc;

use chrono::Utc;
use shiftline_domain::constants::MSG_ADMIN_REQUIRED;
use shiftline_domain::{Employee, Result, ShiftRecord, ShiftlineError};
use tracing::{debug, warn};

use super::ports::AdminApi;
use crate::auth::Session;
use crate::history::shifts_of;

/// Employees and their shifts, loaded together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminOverview {
    pub employees: Vec<Employee>,
    pub shifts: Vec<ShiftRecord>,
}

impl AdminOverview {
    /// Name of the employee who owns `shift`, or "Unknown".
    pub fn shift_owner(&self, shift: &ShiftRecord) -> &str {
        shift
            .employee_id
            .as_deref()
            .and_then(|owner| self.employees.iter().find(|employee| employee.id == owner))
            .map_or("Unknown", |employee| employee.name.as_str())
    }
}

/// Administrator-only listings
///
/// Every call checks the session first; a non-admin never reaches the
/// remote store.
pub struct AdminService {
    api: Arc<dyn AdminApi>,
    session: Arc<Session>,
}

impl AdminService {
    pub fn new(api: Arc<dyn AdminApi>, session: Arc<Session>) -> Self {
        Self { api, session }
    }

    fn ensure_admin(&self) -> Result<()> {
        self.session.expire_if_needed(Utc::now());
        if self.session.is_admin() {
            Ok(())
        } else {
            debug!(authenticated = self.session.is_authenticated(), "admin access denied");
            Err(ShiftlineError::Auth(MSG_ADMIN_REQUIRED.to_string()))
        }
    }

    /// # Errors
    /// `Auth` unless an admin is signed in; remote failures.
    pub async fn fetch_employees(&self) -> Result<Vec<Employee>> {
        self.ensure_admin()?;
        self.api.fetch_employees().await.inspect_err(|err| {
            warn!(error_kind = err.label(), error = %err, "failed to load employees");
        })
    }

    /// # Errors
    /// `Auth` unless an admin is signed in; remote failures.
    pub async fn fetch_all_shifts(&self) -> Result<Vec<ShiftRecord>> {
        self.ensure_admin()?;
        let payload = self.api.fetch_all_shifts().await.inspect_err(|err| {
            warn!(error_kind = err.label(), error = %err, "failed to load shifts");
        })?;
        Ok(shifts_of(payload))
    }

    /// Load employees and shifts concurrently.
    ///
    /// # Errors
    /// The first failure of either listing.
    pub async fn overview(&self) -> Result<AdminOverview> {
        self.ensure_admin()?;
        let (employees, shifts) = tokio::try_join!(self.fetch_employees(), self.fetch_all_shifts())?;
        debug!(employees = employees.len(), shifts = shifts.len(), "admin overview loaded");
        Ok(AdminOverview { employees, shifts })
    }
}
