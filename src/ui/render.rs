//! Text rendering of the viewed work day.

use crate::core::clock::Tick;
use crate::core::navigator::Controls;
use crate::models::work_day::WorkDay;
use crate::utils::colors::{
    RESET, color_for_day_status, color_for_timesheet, colorize_optional,
};
use crate::utils::time::{clock_or_placeholder, format_hms};

fn row(label: &str, value: impl std::fmt::Display) -> String {
    format!("{:<11}: {}\n", label, value)
}

pub fn controls_line(c: &Controls) -> String {
    if c.read_only {
        return "read-only (day completed)".to_string();
    }

    let mut enabled = Vec::new();
    if c.can_start {
        enabled.push(format!("[{}]", c.start_label));
    }
    if c.can_pause {
        enabled.push("[Pause]".to_string());
    }
    if c.can_finish {
        enabled.push("[Finish]".to_string());
    }
    enabled.join(" ")
}

/// Status block for `day` as seen at `tick`.
pub fn status_block(day: &WorkDay, tick: &Tick, controls: &Controls) -> String {
    let mut out = String::new();

    out.push_str(&row(
        "Day status",
        format!(
            "{}{}{}",
            color_for_day_status(day.status),
            day.status.label(),
            RESET
        ),
    ));
    out.push_str(&row(
        "Timesheet",
        format!(
            "{}{}{}",
            color_for_timesheet(day.timesheet.status),
            day.timesheet.status.label(),
            RESET
        ),
    ));
    out.push_str(&row(
        "Started",
        colorize_optional(&clock_or_placeholder(day.start_time.as_ref())),
    ));
    out.push_str(&row(
        "Finished",
        colorize_optional(&clock_or_placeholder(day.end_time.as_ref())),
    ));
    out.push_str(&row("Worked", tick.total_hms()));
    if tick.running {
        out.push_str(&row("Session", tick.session_hms()));
    }

    if let Some(s) = &day.summary {
        out.push_str(&row(
            "Summary",
            format!(
                "{} tasks, {} evidences, {} worked",
                s.tasks_completed,
                s.evidences_submitted,
                format_hms(s.total_work_seconds)
            ),
        ));
    }

    out.push_str(&row("Controls", controls_line(controls)));
    out
}

/// Single line used by the live view, rewritten in place on each tick.
pub fn tick_line(day: &WorkDay, tick: &Tick) -> String {
    format!(
        "{} | {} | {}",
        day.date_str(),
        day.timesheet.status.label(),
        tick.total_hms()
    )
}
