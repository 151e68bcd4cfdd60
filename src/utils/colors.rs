/// ANSI color helper utilities for terminal output.
use crate::models::day_status::DayStatus;
use crate::models::timesheet::TimesheetStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

pub fn color_for_day_status(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Programmed => GREY,
        DayStatus::InProgress => YELLOW,
        DayStatus::Completed => GREEN,
    }
}

pub fn color_for_timesheet(status: TimesheetStatus) -> &'static str {
    match status {
        TimesheetStatus::NotStarted => GREY,
        TimesheetStatus::InProgress => GREEN,
        TimesheetStatus::Paused => YELLOW,
        TimesheetStatus::Completed => CYAN,
    }
}

/// Grey out placeholders such as `--:--`.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
