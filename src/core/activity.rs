use crate::db::queries::{insert_evidence, insert_task, load_work_day};
use crate::errors::{AppError, AppResult};
use crate::models::activity::{Evidence, TaskCompletion};
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::Connection;

/// Recording of completed tasks and submitted evidences for a day.
pub struct ActivityLogic;

/// Completed days are frozen; a day with no stored record is still open.
fn ensure_open(conn: &Connection, date: &NaiveDate) -> AppResult<()> {
    if let Some(day) = load_work_day(conn, date)?
        && day.is_read_only()
    {
        return Err(AppError::ReadOnlyDay(day.date_str()));
    }
    Ok(())
}

impl ActivityLogic {
    pub fn record_task(
        conn: &Connection,
        date: NaiveDate,
        title: &str,
        now: DateTime<Local>,
    ) -> AppResult<TaskCompletion> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidInput("task title is empty".into()));
        }
        ensure_open(conn, &date)?;

        let mut task = TaskCompletion {
            id: 0,
            date,
            title: title.to_string(),
            completed_at: now,
        };
        task.id = insert_task(conn, &task)?;
        Ok(task)
    }

    /// `path` is stored as given; the file itself is not read.
    pub fn submit_evidence(
        conn: &Connection,
        date: NaiveDate,
        path: &str,
        note: Option<&str>,
        now: DateTime<Local>,
    ) -> AppResult<Evidence> {
        if path.trim().is_empty() {
            return Err(AppError::InvalidInput("evidence path is empty".into()));
        }
        ensure_open(conn, &date)?;

        let mut evidence = Evidence {
            id: 0,
            date,
            path: path.trim().to_string(),
            note: note.map(str::trim).unwrap_or_default().to_string(),
            submitted_at: now,
        };
        evidence.id = insert_evidence(conn, &evidence)?;
        Ok(evidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tracker::{DEFAULT_MAX_RETRIES, Tracker};
    use crate::db::gateway::SqliteGateway;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::queries::{activity_counts, list_evidences};
    use chrono::{Duration, TimeZone};

    fn conn() -> Connection {
        let c = Connection::open_in_memory().unwrap();
        run_pending_migrations(&c).unwrap();
        c
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn records_on_a_day_without_stored_record() {
        let c = conn();
        let task = ActivityLogic::record_task(&c, date(), "  Check pumps ", t0()).unwrap();
        assert!(task.id > 0);
        assert_eq!(task.title, "Check pumps");

        ActivityLogic::submit_evidence(&c, date(), "/photos/p1.jpg", None, t0()).unwrap();
        let ev = list_evidences(&c, &date()).unwrap();
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].note, "");

        let counts = activity_counts(&c, &date()).unwrap();
        assert_eq!(counts.tasks_completed, 1);
        assert_eq!(counts.evidences_submitted, 1);
    }

    #[test]
    fn empty_title_is_rejected() {
        let c = conn();
        assert!(matches!(
            ActivityLogic::record_task(&c, date(), "   ", t0()),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn completed_day_rejects_new_activity() {
        let c = conn();
        let mut tracker =
            Tracker::open(SqliteGateway::new(&c), date(), DEFAULT_MAX_RETRIES).unwrap();
        tracker.start(t0()).unwrap();
        tracker.finish(t0() + Duration::hours(1)).unwrap();

        assert!(matches!(
            ActivityLogic::record_task(&c, date(), "late", t0() + Duration::hours(2)),
            Err(AppError::ReadOnlyDay(d)) if d == "2025-03-10"
        ));
        assert!(matches!(
            ActivityLogic::submit_evidence(&c, date(), "/p.jpg", Some("x"), t0()),
            Err(AppError::ReadOnlyDay(_))
        ));
    }
}
