//! Shift history, list payloads and aggregate statistics

use serde::{Deserialize, Serialize};

use super::shift::ShiftRecord;

/// Raw list payload returned by the history and admin shift endpoints.
///
/// The backend answers either with a bare array or with a paginated
/// envelope. Anything else lands in `Unrecognized` instead of failing
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShiftListPayload {
    Bare(Vec<ShiftRecord>),
    Envelope {
        shifts: Vec<ShiftRecord>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pages: Option<u32>,
    },
    Unrecognized(serde_json::Value),
}

/// One normalized page of shift history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    pub shifts: Vec<ShiftRecord>,
    /// 1-based page this listing was requested for.
    pub page: u32,
    /// Total page count, always at least 1.
    pub pages: u32,
}

impl Default for HistoryPage {
    fn default() -> Self {
        Self { shifts: Vec::new(), page: 1, pages: 1 }
    }
}

impl HistoryPage {
    /// Whether a later page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Aggregate worked hours.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShiftStats {
    #[serde(default)]
    pub today: f64,
    #[serde(default)]
    pub weekly: f64,
    #[serde(default)]
    pub monthly: f64,
}
