//! Command handlers
//!
//! Each handler writes its report to `out` and returns a single displayable
//! line as the error when the operation fails.

pub mod admin;
pub mod auth;
pub mod shift;

use std::io::Write;

use shiftline_domain::constants::MSG_NOT_AUTHENTICATED;
use shiftline_domain::Claims;

use crate::cli::{AdminCommand, BreakCommand, Command};
use crate::utils::command_helpers::displayable;
use crate::AppContext;

const MSG_SESSION_UNREADABLE: &str = "Could not read the saved session";

/// Route a parsed command to its handler.
///
/// # Errors
/// The user-facing message of the first failure.
pub async fn dispatch<W: Write>(ctx: &AppContext, command: Command, out: &mut W) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => auth::login(ctx, &email, &password, out).await,
        Command::Register { name, email, password, confirm } => {
            auth::register(ctx, &name, &email, &password, &confirm, out).await
        }
        Command::Logout => auth::logout(ctx, out),
        Command::Whoami => auth::whoami(ctx, out),
        Command::Status(args) => shift::status(ctx, args, out).await,
        Command::Start => shift::start(ctx, out).await,
        Command::End => shift::end(ctx, out).await,
        Command::Break(BreakCommand::Start { kind }) => {
            shift::start_break(ctx, kind.into(), out).await
        }
        Command::Break(BreakCommand::End) => shift::end_break(ctx, out).await,
        Command::History { page, limit } => shift::history(ctx, page, limit, out).await,
        Command::Stats => shift::stats(ctx, out).await,
        Command::Admin(AdminCommand::Employees) => admin::employees(ctx, out).await,
        Command::Admin(AdminCommand::Shifts) => admin::shifts(ctx, out).await,
    }
}

/// Reopen the persisted session and require a signed-in user.
fn signed_in_user(ctx: &AppContext) -> anyhow::Result<Claims> {
    ctx.auth.restore().map_err(|err| displayable(&err, MSG_SESSION_UNREADABLE))?;
    ctx.auth.require_user().map_err(|err| displayable(&err, MSG_NOT_AUTHENTICATED))
}

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
