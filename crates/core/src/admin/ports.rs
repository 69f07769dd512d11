//! Port interfaces for administrator listings

use async_trait::async_trait;
use shiftline_domain::{Employee, Result, ShiftListPayload};

/// Remote admin endpoints
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Every employee account. A non-array payload yields an empty list.
    async fn fetch_employees(&self) -> Result<Vec<Employee>>;

    /// Every employee's shifts, in whatever list shape the backend chose.
    async fn fetch_all_shifts(&self) -> Result<ShiftListPayload>;
}
