//! Administrator listings

use std::io::Write;

use chrono::Utc;
use shiftline_domain::constants::MSG_ADMIN_LOAD_FAILED;

use super::{signed_in_user, write_lines};
use crate::render;
use crate::utils::command_helpers::{displayable, timed};
use crate::AppContext;

pub async fn employees<W: Write>(ctx: &AppContext, out: &mut W) -> anyhow::Result<()> {
    signed_in_user(ctx)?;
    let employees = timed("admin::employees", ctx.admin.fetch_employees())
        .await
        .map_err(|err| displayable(&err, MSG_ADMIN_LOAD_FAILED))?;
    write_lines(out, &render::employee_lines(&employees))?;
    Ok(())
}

/// Shifts are listed with their owners, so employees are loaded too.
pub async fn shifts<W: Write>(ctx: &AppContext, out: &mut W) -> anyhow::Result<()> {
    signed_in_user(ctx)?;
    let overview = timed("admin::shifts", ctx.admin.overview())
        .await
        .map_err(|err| displayable(&err, MSG_ADMIN_LOAD_FAILED))?;
    write_lines(out, &render::admin_shift_lines(&overview, Utc::now()))?;
    Ok(())
}
