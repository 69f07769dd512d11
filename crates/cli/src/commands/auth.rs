//! Sign-in, registration and session commands

use std::io::Write;

use shiftline_domain::constants::{MSG_LOGIN_FAILED, MSG_REGISTER_FAILED};
use shiftline_domain::Claims;

use super::{write_lines, MSG_SESSION_UNREADABLE};
use crate::render;
use crate::utils::command_helpers::{displayable, timed};
use crate::AppContext;

const MSG_LOGOUT_FAILED: &str = "Failed to sign out";

fn display_name(claims: &Claims) -> &str {
    claims.name.as_deref().or(claims.email.as_deref()).unwrap_or("unknown user")
}

pub async fn login<W: Write>(
    ctx: &AppContext,
    email: &str,
    password: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let claims = timed("auth::login", ctx.auth.login(email, password))
        .await
        .map_err(|err| displayable(&err, MSG_LOGIN_FAILED))?;
    writeln!(out, "Signed in as {}", display_name(&claims))?;
    Ok(())
}

pub async fn register<W: Write>(
    ctx: &AppContext,
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let claims = timed("auth::register", ctx.auth.register(name, email, password, confirm))
        .await
        .map_err(|err| displayable(&err, MSG_REGISTER_FAILED))?;
    writeln!(out, "Account created; signed in as {}", display_name(&claims))?;
    Ok(())
}

pub fn logout<W: Write>(ctx: &AppContext, out: &mut W) -> anyhow::Result<()> {
    ctx.auth.logout().map_err(|err| displayable(&err, MSG_LOGOUT_FAILED))?;
    writeln!(out, "Signed out")?;
    Ok(())
}

pub fn whoami<W: Write>(ctx: &AppContext, out: &mut W) -> anyhow::Result<()> {
    ctx.auth.restore().map_err(|err| displayable(&err, MSG_SESSION_UNREADABLE))?;
    match ctx.auth.current_user() {
        Some(claims) => write_lines(out, &render::claims_lines(&claims))?,
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}
