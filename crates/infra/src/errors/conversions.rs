//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use reqwest::Error as HttpError;
use shiftline_domain::ShiftlineError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ShiftlineError);

impl From<InfraError> for ShiftlineError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ShiftlineError> for InfraError {
    fn from(value: ShiftlineError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoShiftlineError {
    fn into_shiftline(self) -> ShiftlineError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ShiftlineError */
/* -------------------------------------------------------------------------- */

impl IntoShiftlineError for HttpError {
    fn into_shiftline(self) -> ShiftlineError {
        if self.is_timeout() {
            return ShiftlineError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return ShiftlineError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return ShiftlineError::Config(format!("invalid HTTP request: {self}"));
        }

        ShiftlineError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_shiftline())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → ShiftlineError */
/* -------------------------------------------------------------------------- */

impl IntoShiftlineError for IoError {
    fn into_shiftline(self) -> ShiftlineError {
        match self.kind() {
            ErrorKind::PermissionDenied => {
                ShiftlineError::Storage(format!("permission denied: {self}"))
            }
            ErrorKind::NotFound => ShiftlineError::Storage(format!("file not found: {self}")),
            _ => ShiftlineError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_shiftline())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
