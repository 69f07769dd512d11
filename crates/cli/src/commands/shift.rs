//! Shift, break, history and statistics commands
//!
//! Every mutation first loads the open shift so the tracker's precondition
//! check sees the backend's current status.

use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use shiftline_core::shift::duration::format_hours;
use shiftline_core::ShiftState;
use shiftline_domain::constants::{
    MSG_END_BREAK_FAILED, MSG_END_SHIFT_FAILED, MSG_FETCH_CURRENT_SHIFT_FAILED,
    MSG_FETCH_HISTORY_FAILED, MSG_FETCH_STATS_FAILED, MSG_START_BREAK_FAILED,
    MSG_START_SHIFT_FAILED,
};
use shiftline_domain::BreakType;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::{signed_in_user, write_lines};
use crate::cli::StatusArgs;
use crate::render;
use crate::utils::command_helpers::{displayable, timed};
use crate::AppContext;

async fn load_current(ctx: &AppContext) -> anyhow::Result<()> {
    signed_in_user(ctx)?;
    timed("shift::load_current", ctx.tracker.load_current_shift())
        .await
        .map_err(|err| displayable(&err, MSG_FETCH_CURRENT_SHIFT_FAILED))?;
    Ok(())
}

fn report<W: Write>(out: &mut W, headline: &str, state: &ShiftState) -> anyhow::Result<()> {
    writeln!(out, "{headline}")?;
    write_lines(out, &render::status_lines(state, Utc::now()))?;
    Ok(())
}

/// Current shift plus today's total, optionally followed by the live timer.
///
/// A stats failure does not hide the shift; the total is reported as
/// unavailable with the stats message.
pub async fn status<W: Write>(ctx: &AppContext, args: StatusArgs, out: &mut W) -> anyhow::Result<()> {
    signed_in_user(ctx)?;
    let state = timed("shift::status", ctx.tracker.refresh())
        .await
        .map_err(|err| displayable(&err, MSG_FETCH_CURRENT_SHIFT_FAILED))?;
    write_lines(out, &render::status_lines(&state, Utc::now()))?;
    match &state.error {
        Some(message) => writeln!(out, "Today:   unavailable ({message})")?,
        None => writeln!(out, "Today:   {}h", format_hours(state.stats.today))?,
    }

    if args.watch {
        watch(ctx, args.ticks, out).await?;
    }
    Ok(())
}

/// Print a timer line every tick until `ticks` lines were printed or the
/// user interrupts. Readings are computed from held state only.
async fn watch<W: Write>(ctx: &AppContext, ticks: Option<u32>, out: &mut W) -> anyhow::Result<()> {
    let mut interval =
        tokio::time::interval(Duration::from_millis(ctx.config.tracker.tick_interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    let mut printed = 0_u32;
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut interrupted => {
                debug!(printed, "watch interrupted");
                break;
            }
        }

        let reading = ctx.tracker.reading(Utc::now());
        writeln!(out, "{}", render::timer_line(&reading))?;
        out.flush()?;

        printed = printed.saturating_add(1);
        if ticks.is_some_and(|limit| printed >= limit) {
            break;
        }
    }
    Ok(())
}

pub async fn start<W: Write>(ctx: &AppContext, out: &mut W) -> anyhow::Result<()> {
    load_current(ctx).await?;
    let state = timed("shift::start", ctx.tracker.start_shift())
        .await
        .map_err(|err| displayable(&err, MSG_START_SHIFT_FAILED))?;
    report(out, "Shift started", &state)
}

pub async fn end<W: Write>(ctx: &AppContext, out: &mut W) -> anyhow::Result<()> {
    load_current(ctx).await?;
    let state = timed("shift::end", ctx.tracker.end_shift())
        .await
        .map_err(|err| displayable(&err, MSG_END_SHIFT_FAILED))?;
    report(out, "Shift ended", &state)
}

pub async fn start_break<W: Write>(
    ctx: &AppContext,
    break_type: BreakType,
    out: &mut W,
) -> anyhow::Result<()> {
    load_current(ctx).await?;
    let state = timed("shift::start_break", ctx.tracker.start_break(break_type))
        .await
        .map_err(|err| displayable(&err, MSG_START_BREAK_FAILED))?;
    report(out, &format!("{} started", break_type.label()), &state)
}

pub async fn end_break<W: Write>(ctx: &AppContext, out: &mut W) -> anyhow::Result<()> {
    load_current(ctx).await?;
    let state = timed("shift::end_break", ctx.tracker.end_break())
        .await
        .map_err(|err| displayable(&err, MSG_END_BREAK_FAILED))?;
    report(out, "Break ended", &state)
}

pub async fn history<W: Write>(
    ctx: &AppContext,
    page: u32,
    limit: Option<u32>,
    out: &mut W,
) -> anyhow::Result<()> {
    signed_in_user(ctx)?;
    let limit = limit.unwrap_or(ctx.config.tracker.history_page_size);
    let history = timed("shift::history", ctx.tracker.fetch_history(page, limit))
        .await
        .map_err(|err| displayable(&err, MSG_FETCH_HISTORY_FAILED))?;
    write_lines(out, &render::history_lines(&history, Utc::now()))?;
    Ok(())
}

pub async fn stats<W: Write>(ctx: &AppContext, out: &mut W) -> anyhow::Result<()> {
    signed_in_user(ctx)?;
    let stats = timed("shift::stats", ctx.tracker.fetch_stats())
        .await
        .map_err(|err| displayable(&err, MSG_FETCH_STATS_FAILED))?;
    write_lines(out, &render::stats_lines(&stats))?;
    Ok(())
}
