use crate::core::clock::displayed_total;
use crate::models::work_day::WorkDay;
use crate::utils::time::format_hms;
use chrono::{DateTime, Local};
use serde::Serialize;

/// Flat row for CSV / JSON export of a work day.
#[derive(Serialize, Clone, Debug)]
pub struct WorkDayExport {
    pub date: String,
    pub day_status: String,
    pub timesheet_status: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub worked_seconds: i64,
    pub worked: String,
    pub tasks_completed: Option<u32>,
    pub evidences_submitted: Option<u32>,
}

impl WorkDayExport {
    /// Worked time includes a still running session up to `now`.
    pub fn from_work_day(day: &WorkDay, now: DateTime<Local>) -> Self {
        let worked_seconds = displayed_total(&day.timesheet, now);
        Self {
            date: day.date_str(),
            day_status: day.status.to_db_str().to_string(),
            timesheet_status: day.timesheet.status.to_db_str().to_string(),
            start_time: day.start_time.map(|t| t.to_rfc3339()),
            end_time: day.end_time.map(|t| t.to_rfc3339()),
            worked_seconds,
            worked: format_hms(worked_seconds),
            tasks_completed: day.summary.map(|s| s.tasks_completed),
            evidences_submitted: day.summary.map(|s| s.evidences_submitted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timesheet::{Action, apply};
    use crate::models::activity::ActivityCounts;
    use chrono::{Duration, NaiveDate, TimeZone};

    #[test]
    fn running_day_counts_the_open_session() {
        let t0 = Local.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let day = WorkDay::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        let day = apply(&day, Action::Start, t0, ActivityCounts::default()).unwrap();

        let row = WorkDayExport::from_work_day(&day, t0 + Duration::minutes(90));
        assert_eq!(row.worked_seconds, 5400);
        assert_eq!(row.worked, "01:30:00");
        assert_eq!(row.timesheet_status, "in_progress");
        assert!(row.end_time.is_none());
        assert!(row.tasks_completed.is_none());
    }
}
