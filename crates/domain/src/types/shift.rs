//! Shift records as exchanged with the remote store

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ShiftlineError;

/// Kind of break an employee can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakType {
    Lunch,
    Short,
}

impl BreakType {
    /// Wire representation (`LUNCH` / `SHORT`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lunch => "LUNCH",
            Self::Short => "SHORT",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Lunch => "Lunch Break",
            Self::Short => "Short Break",
        }
    }
}

impl fmt::Display for BreakType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BreakType {
    type Err = ShiftlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LUNCH" => Ok(Self::Lunch),
            "SHORT" => Ok(Self::Short),
            other => Err(ShiftlineError::Validation(format!(
                "Unknown break type '{other}' (expected LUNCH or SHORT)"
            ))),
        }
    }
}

/// Derived status of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    #[default]
    Inactive,
    Active,
    Break,
}

impl ShiftStatus {
    /// Derive status from the current shift record.
    ///
    /// Absent or closed ⇒ `Inactive`; open and on break ⇒ `Break`;
    /// otherwise `Active`.
    pub fn of(shift: Option<&ShiftRecord>) -> Self {
        match shift {
            None => Self::Inactive,
            Some(shift) if shift.end_time.is_some() => Self::Inactive,
            Some(shift) if shift.on_break => Self::Break,
            Some(_) => Self::Active,
        }
    }

    /// Wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "INACTIVE",
            Self::Active => "ACTIVE",
            Self::Break => "BREAK",
        }
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic position captured at shift/break transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: f64,
}

impl Position {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self { latitude, longitude, accuracy }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// A sub-interval of a shift excluded from worked time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakInterval {
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl BreakInterval {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

/// One continuous work session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub on_break: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_type: Option<BreakType>,
    #[serde(default)]
    pub breaks: Vec<BreakInterval>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Position>,
    /// Owner of the shift; populated in admin listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl ShiftRecord {
    /// Open shift started at `start_time` with no breaks.
    pub fn open(id: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            start_time,
            end_time: None,
            on_break: false,
            break_type: None,
            breaks: Vec::new(),
            location: None,
            employee_id: None,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// The break interval currently open, if any.
    pub fn open_break(&self) -> Option<&BreakInterval> {
        self.breaks.iter().rev().find(|interval| interval.is_open())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn deserializes_backend_payload() {
        let json = r#"{
            "_id": "65f0c2",
            "employeeId": "emp-1",
            "startTime": "2024-03-12T09:00:00.000Z",
            "onBreak": true,
            "breakType": "LUNCH",
            "breaks": [{ "startTime": "2024-03-12T12:00:00.000Z" }],
            "location": { "latitude": 52.52, "longitude": 13.405, "accuracy": 12.5 }
        }"#;

        let shift: ShiftRecord = serde_json::from_str(json).unwrap();
        assert_eq!(shift.id, "65f0c2");
        assert_eq!(shift.employee_id.as_deref(), Some("emp-1"));
        assert_eq!(shift.start_time, Utc.with_ymd_and_hms(2024, 3, 12, 9, 0, 0).unwrap());
        assert!(shift.is_open());
        assert_eq!(shift.break_type, Some(BreakType::Lunch));
        assert!(shift.open_break().is_some());
        assert_eq!(ShiftStatus::of(Some(&shift)), ShiftStatus::Break);
    }

    #[test]
    fn accepts_plain_id_and_missing_optionals() {
        let json = r#"{ "id": "abc", "startTime": "2024-03-12T09:00:00Z" }"#;
        let shift: ShiftRecord = serde_json::from_str(json).unwrap();
        assert_eq!(shift.id, "abc");
        assert!(shift.breaks.is_empty());
        assert!(!shift.on_break);
        assert_eq!(ShiftStatus::of(Some(&shift)), ShiftStatus::Active);
    }

    #[test]
    fn status_derivation_covers_every_case() {
        let start = Utc.with_ymd_and_hms(2024, 3, 12, 9, 0, 0).unwrap();
        assert_eq!(ShiftStatus::of(None), ShiftStatus::Inactive);

        let mut shift = ShiftRecord::open("s", start);
        assert_eq!(ShiftStatus::of(Some(&shift)), ShiftStatus::Active);

        shift.on_break = true;
        assert_eq!(ShiftStatus::of(Some(&shift)), ShiftStatus::Break);

        // A closed shift is inactive even if the backend left the flag set.
        shift.end_time = Some(start + chrono::Duration::hours(8));
        assert_eq!(ShiftStatus::of(Some(&shift)), ShiftStatus::Inactive);
    }

    #[test]
    fn break_type_parses_case_insensitively() {
        assert_eq!("lunch".parse::<BreakType>().unwrap(), BreakType::Lunch);
        assert_eq!(" Short ".parse::<BreakType>().unwrap(), BreakType::Short);
        assert!(matches!("nap".parse::<BreakType>(), Err(ShiftlineError::Validation(_))));
        assert_eq!(BreakType::Short.label(), "Short Break");
    }

    #[test]
    fn position_displays_six_decimals() {
        let position = Position::new(52.52, 13.405, 5.0);
        assert_eq!(position.to_string(), "52.520000, 13.405000");
    }
}
