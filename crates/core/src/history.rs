//! Normalization of list-shaped remote payloads
//!
//! List endpoints answer with a bare array or a paginated envelope. Any other
//! shape degrades to an empty page with a logged diagnostic; it never fails.

use shiftline_domain::{HistoryPage, ShiftListPayload, ShiftRecord};
use tracing::warn;

/// Normalize a history payload requested for `page`.
pub fn normalize_shift_list(payload: ShiftListPayload, page: u32) -> HistoryPage {
    let page = page.max(1);
    match payload {
        ShiftListPayload::Bare(shifts) => HistoryPage { shifts, page, pages: 1 },
        ShiftListPayload::Envelope { shifts, pages } => {
            HistoryPage { shifts, page, pages: pages.unwrap_or(1).max(1) }
        }
        ShiftListPayload::Unrecognized(value) => {
            warn!(
                payload_kind = json_kind(&value),
                page, "unexpected shift list payload; treating as empty"
            );
            HistoryPage { shifts: Vec::new(), page, pages: 1 }
        }
    }
}

/// Flatten any list payload into its shifts.
pub fn shifts_of(payload: ShiftListPayload) -> Vec<ShiftRecord> {
    normalize_shift_list(payload, 1).shifts
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
