use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

/// A task marked as done on a given day.
#[derive(Debug, Clone, Serialize)]
pub struct TaskCompletion {
    pub id: i64,
    pub date: NaiveDate,
    pub title: String,
    pub completed_at: DateTime<Local>,
}

/// Evidence (photo/video file) submitted for a given day.
/// Only the reference to the captured file is stored.
#[derive(Debug, Clone, Serialize)]
pub struct Evidence {
    pub id: i64,
    pub date: NaiveDate,
    pub path: String,
    pub note: String,
    pub submitted_at: DateTime<Local>,
}

/// Per-day counters used to build the completion summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityCounts {
    pub tasks_completed: u32,
    pub evidences_submitted: u32,
}
