use super::timesheet::TimesheetStatus;
use serde::Serialize;

/// Day-level status of a work day record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayStatus {
    Programmed,
    InProgress,
    Completed,
}

impl DayStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DayStatus::Programmed => "programmed",
            DayStatus::InProgress => "in_progress",
            DayStatus::Completed => "completed",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "programmed" => Some(DayStatus::Programmed),
            "in_progress" => Some(DayStatus::InProgress),
            "completed" => Some(DayStatus::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayStatus::Programmed => "Programmed",
            DayStatus::InProgress => "In progress",
            DayStatus::Completed => "Completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, DayStatus::Completed)
    }
}

/// A work day's status is always the image of its timesheet status.
impl From<TimesheetStatus> for DayStatus {
    fn from(status: TimesheetStatus) -> Self {
        match status {
            TimesheetStatus::NotStarted => DayStatus::Programmed,
            TimesheetStatus::InProgress | TimesheetStatus::Paused => DayStatus::InProgress,
            TimesheetStatus::Completed => DayStatus::Completed,
        }
    }
}
