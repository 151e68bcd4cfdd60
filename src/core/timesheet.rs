//! Transition rules of a day's timesheet.
//!
//! ```text
//! not-started ──start──▶ in-progress ──pause──▶ paused
//!                             ▲                    │
//!                             └──────resume────────┘
//! in-progress | paused ──finish──▶ completed (terminal)
//! ```
//!
//! The functions never touch the input record; they return the next one or
//! an error, so callers can keep the old value for rollback.

use crate::core::clock::elapsed_seconds;
use crate::models::activity::ActivityCounts;
use crate::models::day_status::DayStatus;
use crate::models::timesheet::TimesheetStatus;
use crate::models::work_day::{DaySummary, WorkDay};
use chrono::{DateTime, Local};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    Start,
    Pause,
    Finish,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Pause => "pause",
            Action::Finish => "finish",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {action} a timesheet that is {from}")]
    InvalidTransition {
        action: Action,
        from: TimesheetStatus,
    },

    #[error("cannot {action}: the day is completed and read-only")]
    TerminalStateViolation { action: Action },
}

/// Whether `action` is accepted from `from`.
pub fn check(action: Action, from: TimesheetStatus) -> Result<(), TransitionError> {
    use TimesheetStatus::*;

    if from.is_terminal() {
        return Err(TransitionError::TerminalStateViolation { action });
    }

    let ok = match action {
        Action::Start => matches!(from, NotStarted | Paused),
        Action::Pause => matches!(from, InProgress),
        Action::Finish => matches!(from, InProgress | Paused),
    };

    if ok {
        Ok(())
    } else {
        Err(TransitionError::InvalidTransition { action, from })
    }
}

/// Compute the record that results from `action` at `now`.
///
/// `counts` only matters for `Finish`, where it feeds the day summary.
pub fn apply(
    day: &WorkDay,
    action: Action,
    now: DateTime<Local>,
    counts: ActivityCounts,
) -> Result<WorkDay, TransitionError> {
    check(action, day.timesheet.status)?;

    let mut next = day.clone();
    match action {
        Action::Start => {
            next.timesheet.status = TimesheetStatus::InProgress;
            next.timesheet.current_session_start = Some(now);
            if next.start_time.is_none() {
                next.start_time = Some(now);
            }
        }
        Action::Pause => {
            flush_session(&mut next, now);
            next.timesheet.status = TimesheetStatus::Paused;
        }
        Action::Finish => {
            if next.timesheet.status.is_running() {
                flush_session(&mut next, now);
            }
            next.timesheet.status = TimesheetStatus::Completed;
            next.end_time = Some(now);
            next.summary = Some(DaySummary {
                tasks_completed: counts.tasks_completed,
                total_work_seconds: next.timesheet.total_duration,
                evidences_submitted: counts.evidences_submitted,
            });
        }
    }
    next.status = DayStatus::from(next.timesheet.status);

    Ok(next)
}

/// Move the running session into `total_duration` and clear its start.
fn flush_session(day: &mut WorkDay, now: DateTime<Local>) {
    let ts = &mut day.timesheet;
    ts.total_duration += elapsed_seconds(ts.current_session_start, now);
    ts.current_session_start = None;
}
