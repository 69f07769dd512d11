//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Shiftline
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ShiftlineError {
    /// Transport failure: connection refused, timeout, DNS.
    #[error("Network error: {0}")]
    Network(String),

    /// Missing, rejected (401) or expired credentials.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Client-side input check failed before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend rejected the operation; carries its message verbatim.
    #[error("Remote error: {0}")]
    Remote(String),

    /// Device position could not be acquired.
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    /// Response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Operation not allowed from the current shift status.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShiftlineError {
    /// Message suitable for showing to the user.
    ///
    /// Errors that carry a user-facing message (backend rejections, input
    /// validation, position failures) return it as-is when non-empty; all
    /// other failures collapse to `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::Remote(msg)
            | Self::Auth(msg)
            | Self::Validation(msg)
            | Self::PositionUnavailable(msg)
            | Self::InvalidTransition(msg)
                if !msg.trim().is_empty() =>
            {
                msg.clone()
            }
            _ => fallback.to_string(),
        }
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::Validation(_) => "validation",
            Self::Remote(_) => "remote",
            Self::PositionUnavailable(_) => "position_unavailable",
            Self::MalformedResponse(_) => "malformed_response",
            Self::InvalidTransition(_) => "invalid_transition",
            Self::Config(_) => "config",
            Self::Storage(_) => "storage",
            Self::Internal(_) => "internal",
        }
    }

    /// True when the error means the session is no longer usable.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

/// Result type alias for Shiftline operations
pub type Result<T> = std::result::Result<T, ShiftlineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_message_is_surfaced_verbatim() {
        let err = ShiftlineError::Remote("You already have an active shift".into());
        assert_eq!(err.display_message("Failed to start shift"), "You already have an active shift");
    }

    #[test]
    fn empty_remote_message_uses_fallback() {
        let err = ShiftlineError::Remote("  ".into());
        assert_eq!(err.display_message("Failed to start shift"), "Failed to start shift");
    }

    #[test]
    fn transport_errors_use_fallback() {
        let err = ShiftlineError::Network("HTTP connection failure".into());
        assert_eq!(err.display_message("Failed to end break"), "Failed to end break");

        let err = ShiftlineError::MalformedResponse("missing field".into());
        assert_eq!(err.display_message("Failed to fetch shift statistics"), "Failed to fetch shift statistics");
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = ShiftlineError::Validation("Passwords do not match".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Validation");
        assert_eq!(json["message"], "Passwords do not match");
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(ShiftlineError::PositionUnavailable(String::new()).label(), "position_unavailable");
        assert_eq!(ShiftlineError::InvalidTransition(String::new()).label(), "invalid_transition");
        assert!(ShiftlineError::Auth("expired".into()).is_auth());
    }
}
