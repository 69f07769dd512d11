//! `shiftline` binary entry point.
//!
//! This is a terminal tool, so command output goes through `println!`-style
//! writes on stdout while diagnostics go through `tracing` on stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use clap::Parser;
use shiftline_cli::utils::logging::init_tracing;
use shiftline_cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Before parsing: clap reads SHIFTLINE_PASSWORD from the environment
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_json);
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(error = %err, "no .env loaded"),
    }

    let mut stdout = std::io::stdout().lock();
    match shiftline_cli::run(cli, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
