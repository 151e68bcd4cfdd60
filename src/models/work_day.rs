use super::day_status::DayStatus;
use super::timesheet::{Timesheet, TimesheetStatus};
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

/// Aggregate counters of a completed day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub tasks_completed: u32,
    pub total_work_seconds: i64,
    pub evidences_submitted: u32,
}

/// A single calendar day's operational record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkDay {
    /// Store id, `0` until the record is materialized.
    pub id: i64,
    pub date: NaiveDate,
    pub status: DayStatus,
    pub start_time: Option<DateTime<Local>>,
    pub end_time: Option<DateTime<Local>>,
    pub timesheet: Timesheet,
    pub summary: Option<DaySummary>,
}

impl WorkDay {
    /// Fresh, not-started record for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: 0,
            date,
            status: DayStatus::Programmed,
            start_time: None,
            end_time: None,
            timesheet: Timesheet::default(),
            summary: None,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_read_only(&self) -> bool {
        self.status.is_completed()
    }

    /// Validate the cross-field invariants of a record.
    ///
    /// Returns the first violated rule as a human readable message.
    pub fn check_invariants(&self) -> Result<(), String> {
        let ts = &self.timesheet;

        if self.status != DayStatus::from(ts.status) {
            return Err(format!(
                "day status '{}' does not match timesheet status '{}'",
                self.status.to_db_str(),
                ts.status.to_db_str()
            ));
        }

        let completed = self.status.is_completed();
        if self.end_time.is_some() != completed {
            return Err("end time must be set exactly when the day is completed".into());
        }
        if self.summary.is_some() != completed {
            return Err("summary must exist exactly when the day is completed".into());
        }

        if ts.current_session_start.is_some() != ts.status.is_running() {
            return Err("session start must be set exactly while the timesheet runs".into());
        }

        let started = ts.status != TimesheetStatus::NotStarted;
        if self.start_time.is_some() != started {
            return Err("start time must be set once the timesheet has been started".into());
        }

        if ts.total_duration < 0 {
            return Err(format!("negative total duration: {}", ts.total_duration));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, h, m, 0).unwrap()
    }

    #[test]
    fn new_day_is_consistent() {
        let day = WorkDay::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(day.status, DayStatus::Programmed);
        assert_eq!(day.timesheet.status, TimesheetStatus::NotStarted);
        assert!(day.check_invariants().is_ok());
        assert!(!day.is_read_only());
    }

    #[test]
    fn completed_day_without_summary_is_rejected() {
        let mut day = WorkDay::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        day.status = DayStatus::Completed;
        day.timesheet.status = TimesheetStatus::Completed;
        day.start_time = Some(at(8, 0));
        day.end_time = Some(at(17, 0));

        let err = day.check_invariants().unwrap_err();
        assert!(err.contains("summary"));

        day.summary = Some(DaySummary::default());
        assert!(day.check_invariants().is_ok());
        assert!(day.is_read_only());
    }

    #[test]
    fn running_timesheet_requires_session_start() {
        let mut day = WorkDay::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        day.status = DayStatus::InProgress;
        day.timesheet.status = TimesheetStatus::InProgress;
        day.start_time = Some(at(8, 0));

        assert!(day.check_invariants().is_err());

        day.timesheet.current_session_start = Some(at(8, 0));
        assert!(day.check_invariants().is_ok());
    }
}
