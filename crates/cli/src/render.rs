//! Plain-text rendering of service results
//!
//! Every function here is pure: it takes the data plus `now` and returns the
//! lines to print. Timestamps are shown in UTC.

use chrono::{DateTime, Utc};
use shiftline_core::shift::duration::{
    break_duration, format_clock, format_hours, format_hours_minutes, working_duration,
};
use shiftline_core::{AdminOverview, ShiftState, TimerReading};
use shiftline_domain::{Claims, Employee, HistoryPage, ShiftRecord, ShiftStats, ShiftStatus};

pub fn timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Status block for the current shift.
pub fn status_lines(state: &ShiftState, now: DateTime<Utc>) -> Vec<String> {
    let reading = TimerReading::at(state, now);
    let mut lines = vec![format!("Status:  {}", reading.status_label())];

    if let Some(started) = reading.started_at {
        lines.push(format!("Started: {}", timestamp(started)));
        if let Some(ended) = reading.ended_at {
            lines.push(format!("Ended:   {}", timestamp(ended)));
        }
        if let Some(location) = state.current_shift.as_ref().and_then(|shift| shift.location) {
            lines.push(format!("Location: {location}"));
        }
        lines.push(format!("Worked:  {}", format_clock(reading.working)));
        lines.push(format!("Breaks:  {}", format_clock(reading.breaks)));
    }
    lines
}

/// One line of the live timer.
pub fn timer_line(reading: &TimerReading) -> String {
    match reading.status {
        ShiftStatus::Inactive => reading.status_label().to_string(),
        ShiftStatus::Active | ShiftStatus::Break => format!(
            "{}  {} worked, {} on break",
            reading.status_label(),
            format_clock(reading.working),
            format_clock(reading.breaks)
        ),
    }
}

fn shift_row(shift: &ShiftRecord, now: DateTime<Utc>) -> String {
    let end = shift
        .end_time
        .map_or_else(|| "in progress".to_string(), |end| end.format("%H:%M").to_string());
    format!(
        "{}  {} - {}  worked {}  breaks {}",
        shift.start_time.format("%Y-%m-%d"),
        shift.start_time.format("%H:%M"),
        end,
        format_hours_minutes(working_duration(shift, now)),
        format_hours_minutes(break_duration(shift, now))
    )
}

pub fn history_lines(page: &HistoryPage, now: DateTime<Utc>) -> Vec<String> {
    let mut lines: Vec<String> = if page.shifts.is_empty() {
        vec!["No shifts recorded.".to_string()]
    } else {
        page.shifts.iter().map(|shift| shift_row(shift, now)).collect()
    };
    lines.push(format!("Page {} of {}", page.page, page.pages));
    lines
}

pub fn stats_lines(stats: &ShiftStats) -> Vec<String> {
    vec![
        format!("Today:      {}h", format_hours(stats.today)),
        format!("This week:  {}h", format_hours(stats.weekly)),
        format!("This month: {}h", format_hours(stats.monthly)),
    ]
}

pub fn claims_lines(claims: &Claims) -> Vec<String> {
    let mut lines = vec![
        format!("Name:  {}", claims.name.as_deref().unwrap_or("-")),
        format!("Email: {}", claims.email.as_deref().unwrap_or("-")),
        format!("Role:  {}", claims.role.label()),
    ];
    if let Some(expires) = claims.expires_at() {
        lines.push(format!("Session expires {}", timestamp(expires)));
    }
    lines
}

pub fn employee_lines(employees: &[Employee]) -> Vec<String> {
    if employees.is_empty() {
        return vec!["No employees found.".to_string()];
    }
    employees
        .iter()
        .map(|employee| {
            format!(
                "{} <{}>  {}  {}",
                employee.name,
                employee.email,
                employee.role.label(),
                if employee.active { "active" } else { "inactive" }
            )
        })
        .collect()
}

/// All shifts, each prefixed with its owner's name.
pub fn admin_shift_lines(overview: &AdminOverview, now: DateTime<Utc>) -> Vec<String> {
    if overview.shifts.is_empty() {
        return vec!["No shifts recorded.".to_string()];
    }
    overview
        .shifts
        .iter()
        .map(|shift| {
            let row = format!("{}  {}", overview.shift_owner(shift), shift_row(shift, now));
            match shift.location {
                Some(location) => format!("{row}  at {location}"),
                None => row,
            }
        })
        .collect()
}
