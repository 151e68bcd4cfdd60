use chrono::{DateTime, Local};
use serde::Serialize;

/// Clock-in/out status of a single day's timesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimesheetStatus {
    NotStarted,
    InProgress,
    Paused,
    Completed,
}

impl TimesheetStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TimesheetStatus::NotStarted => "not_started",
            TimesheetStatus::InProgress => "in_progress",
            TimesheetStatus::Paused => "paused",
            TimesheetStatus::Completed => "completed",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "not_started" => Some(TimesheetStatus::NotStarted),
            "in_progress" => Some(TimesheetStatus::InProgress),
            "paused" => Some(TimesheetStatus::Paused),
            "completed" => Some(TimesheetStatus::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimesheetStatus::NotStarted => "Not started",
            TimesheetStatus::InProgress => "In progress",
            TimesheetStatus::Paused => "Paused",
            TimesheetStatus::Completed => "Completed",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TimesheetStatus::InProgress)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TimesheetStatus::Completed)
    }
}

impl std::fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timesheet {
    pub status: TimesheetStatus,
    /// Most recent clock-in; set only while `status` is `InProgress`.
    pub current_session_start: Option<DateTime<Local>>,
    /// Seconds of all stopped sessions. The running session is not included.
    pub total_duration: i64,
}

impl Default for Timesheet {
    fn default() -> Self {
        Self {
            status: TimesheetStatus::NotStarted,
            current_session_start: None,
            total_duration: 0,
        }
    }
}
