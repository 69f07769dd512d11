//! # Shiftline CLI
//!
//! Terminal front end for the Shiftline shift tracker.
//!
//! This crate contains:
//! - The clap command surface
//! - The application context wiring infra implementations into core services
//! - Command handlers and plain-text rendering
//! - Logging initialisation

pub mod cli;
pub mod commands;
pub mod context;
pub mod render;
pub mod utils;

use std::io::Write;

use shiftline_domain::Config;

pub use cli::Cli;
pub use context::AppContext;

/// Load configuration: an explicit file when given, otherwise environment,
/// probed files, then defaults.
///
/// # Errors
/// `Config` when the source is unreadable or invalid.
pub fn load_config(cli: &Cli) -> shiftline_domain::Result<Config> {
    match &cli.config {
        Some(path) => shiftline_infra::config::load_from_file(Some(path.clone())),
        None => shiftline_infra::config::load_or_default(),
    }
}

/// Build the context and run the parsed command.
///
/// # Errors
/// A single user-facing line describing the failure.
pub async fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    let config = load_config(&cli).map_err(|err| anyhow::anyhow!(err.to_string()))?;
    let ctx = AppContext::new(config).map_err(|err| anyhow::anyhow!(err.to_string()))?;
    commands::dispatch(&ctx, cli.command, out).await
}
