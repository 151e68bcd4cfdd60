//! Session clock: elapsed time of the running session.
//!
//! Everything here is a pure function of the stored timesheet and an injected
//! `now`. Nothing is persisted; the caller re-evaluates on every tick.

use crate::models::timesheet::Timesheet;
use crate::models::work_day::WorkDay;
use crate::utils::time::format_hms;
use chrono::{DateTime, Local};

/// Seconds since `session_start`, or `0` without an active session.
/// A `now` earlier than the start (clock skew) also yields `0`.
pub fn elapsed_seconds(session_start: Option<DateTime<Local>>, now: DateTime<Local>) -> i64 {
    match session_start {
        Some(start) => (now - start).num_seconds().max(0),
        None => 0,
    }
}

/// Flushed total plus the live session when the timesheet is running.
pub fn displayed_total(timesheet: &Timesheet, now: DateTime<Local>) -> i64 {
    let live = if timesheet.status.is_running() {
        elapsed_seconds(timesheet.current_session_start, now)
    } else {
        0
    };
    timesheet.total_duration + live
}

/// What the presentation layer renders on a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub at: DateTime<Local>,
    pub session_seconds: i64,
    pub total_seconds: i64,
    pub running: bool,
}

impl Tick {
    pub fn total_hms(&self) -> String {
        format_hms(self.total_seconds)
    }

    pub fn session_hms(&self) -> String {
        format_hms(self.session_seconds)
    }
}

pub struct SessionClock;

impl SessionClock {
    pub fn tick(day: &WorkDay, now: DateTime<Local>) -> Tick {
        let ts = &day.timesheet;
        let running = ts.status.is_running();
        let session_seconds = if running {
            elapsed_seconds(ts.current_session_start, now)
        } else {
            0
        };

        Tick {
            at: now,
            session_seconds,
            total_seconds: ts.total_duration + session_seconds,
            running,
        }
    }
}
