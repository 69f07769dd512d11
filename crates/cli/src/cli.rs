//! Command-line surface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use shiftline_domain::BreakType;

/// Track working shifts and breaks against a Shiftline backend
#[derive(Parser, Debug)]
#[command(name = "shiftline", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Config file (TOML or JSON); probed from the working directory when omitted
    #[arg(global = true, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(global = true, short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(global = true, long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SHIFTLINE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "SHIFTLINE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Password confirmation
        #[arg(long, env = "SHIFTLINE_PASSWORD", hide_env_values = true)]
        confirm: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show the current shift
    Status(StatusArgs),

    /// Start a shift at the configured position
    Start,

    /// End the current shift
    End,

    /// Start or end a break
    #[command(subcommand)]
    Break(BreakCommand),

    /// List past shifts
    History {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Page size; defaults to tracker.history_page_size
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show worked-hour totals
    Stats,

    /// Administrator listings
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct StatusArgs {
    /// Keep printing the live timer
    #[arg(long)]
    pub watch: bool,

    /// Stop watching after this many ticks
    #[arg(
        long,
        value_name = "N",
        requires = "watch",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub ticks: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum BreakCommand {
    /// Start a break
    Start {
        #[arg(long = "type", value_enum, default_value_t = BreakKind::Short)]
        kind: BreakKind,
    },
    /// End the open break
    End,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    Lunch,
    Short,
}

impl From<BreakKind> for BreakType {
    fn from(kind: BreakKind) -> Self {
        match kind {
            BreakKind::Lunch => Self::Lunch,
            BreakKind::Short => Self::Short,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// List employees
    Employees,
    /// List every employee's shifts
    Shifts,
}
