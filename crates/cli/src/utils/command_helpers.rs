//! Shared plumbing for command handlers

use std::future::Future;
use std::time::Instant;

use shiftline_domain::{Result, ShiftlineError};

use super::logging::log_command_execution;

/// Run one service call and log its outcome and duration.
pub async fn timed<T, F>(command: &'static str, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let result = call.await;
    log_command_execution(command, start.elapsed(), result.as_ref().err());
    result
}

/// Turn a service error into the single line shown to the user.
pub fn displayable(err: &ShiftlineError, fallback: &str) -> anyhow::Error {
    anyhow::anyhow!(err.display_message(fallback))
}
