//! API-specific error types
//!
//! Classifies HTTP-level failures before they are folded into the domain
//! error. Nothing here is retried.

use reqwest::StatusCode;
use shiftline_domain::ShiftlineError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401: the session is no longer accepted
    Authentication,
    /// Other 4xx: the backend rejected the request
    Client,
    /// 5xx
    Server,
    /// Connection, DNS or timeout failures
    Network,
    /// The body could not be read as the expected type
    Decode,
}

/// API operation errors
///
/// Rejections keep the backend's `message` field when the body carried one.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed ({})", .message.as_deref().unwrap_or("no message"))]
    Auth { message: Option<String> },

    #[error("Request rejected with status {status} ({})", .message.as_deref().unwrap_or("no message"))]
    Client { status: u16, message: Option<String> },

    #[error("Server error ({status})")]
    Server { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        let code = status.as_u16();
        if status == StatusCode::UNAUTHORIZED {
            Self::Auth { message }
        } else if status.is_server_error() {
            Self::Server { status: code, message }
        } else if status.is_client_error() {
            Self::Client { status: code, message }
        } else {
            Self::Network(format!("unexpected HTTP status {code}"))
        }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth { .. } => ApiErrorCategory::Authentication,
            Self::Client { .. } => ApiErrorCategory::Client,
            Self::Server { .. } => ApiErrorCategory::Server,
            Self::Network(_) => ApiErrorCategory::Network,
            Self::Decode(_) => ApiErrorCategory::Decode,
        }
    }

    /// HTTP status, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { .. } => Some(StatusCode::UNAUTHORIZED.as_u16()),
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }
}

/// Rejections carry the backend's message, or an empty one so the caller's
/// fallback text is shown.
impl From<ApiError> for ShiftlineError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth { message } => Self::Auth(message.unwrap_or_default()),
            ApiError::Client { message, .. } | ApiError::Server { message, .. } => {
                Self::Remote(message.unwrap_or_default())
            }
            ApiError::Network(message) => Self::Network(message),
            ApiError::Decode(message) => Self::MalformedResponse(message),
        }
    }
}

/// Pull the `message` field out of an error body, if it has one.
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
