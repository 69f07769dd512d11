//! Session token payload decoding
//!
//! Tokens are JWTs issued by the backend. Only the payload segment is read;
//! the signature is the backend's business and is not verified here.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use shiftline_domain::{Claims, Result, ShiftlineError};

/// Decode the claims carried by `token`.
///
/// # Errors
/// Returns `ShiftlineError::Auth` when the token is not three dot-separated
/// segments or the payload is not base64url-encoded JSON.
pub fn decode_claims(token: &str) -> Result<Claims> {
    let mut segments = token.trim().split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(ShiftlineError::Auth("malformed session token".to_string())),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|err| ShiftlineError::Auth(format!("session token payload is not base64url: {err}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|err| ShiftlineError::Auth(format!("session token payload is not valid JSON: {err}")))
}
