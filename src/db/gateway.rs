//! SQLite-backed persistence gateway.

use crate::core::gateway::{GatewayError, GatewayResult, PersistenceGateway};
use crate::db::queries;
use crate::models::activity::ActivityCounts;
use crate::models::timesheet::TimesheetStatus;
use crate::models::work_day::WorkDay;
use chrono::NaiveDate;
use rusqlite::Connection;

pub struct SqliteGateway<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteGateway<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl PersistenceGateway for SqliteGateway<'_> {
    fn load_work_day(&mut self, date: NaiveDate) -> GatewayResult<WorkDay> {
        queries::load_work_day(self.conn, &date)?.ok_or(GatewayError::NotFound(date))
    }

    fn insert_work_day(&mut self, day: &WorkDay) -> GatewayResult<i64> {
        Ok(queries::insert_work_day(self.conn, day)?)
    }

    fn commit_transition(
        &mut self,
        expected: TimesheetStatus,
        day: &WorkDay,
    ) -> GatewayResult<()> {
        if queries::commit_transition(self.conn, expected, day)? {
            Ok(())
        } else {
            Err(GatewayError::Conflict(day.date))
        }
    }

    fn activity_counts(&mut self, date: NaiveDate) -> GatewayResult<ActivityCounts> {
        Ok(queries::activity_counts(self.conn, &date)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tracker::{DEFAULT_MAX_RETRIES, Tracker, TrackerError};
    use crate::db::migrate::run_pending_migrations;
    use crate::models::day_status::DayStatus;
    use chrono::{DateTime, Duration, Local, TimeZone};

    fn conn() -> Connection {
        let c = Connection::open_in_memory().unwrap();
        c.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_pending_migrations(&c).unwrap();
        c
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 7, 30, 0).unwrap()
    }

    #[test]
    fn full_day_is_persisted() {
        let c = conn();
        {
            let mut t = Tracker::open(SqliteGateway::new(&c), date(), DEFAULT_MAX_RETRIES).unwrap();
            t.start(t0()).unwrap();
            t.pause(t0() + Duration::hours(4)).unwrap();
            t.start(t0() + Duration::hours(5)).unwrap();
            t.finish(t0() + Duration::hours(9)).unwrap();
        }

        let mut gw = SqliteGateway::new(&c);
        let day = gw.load_work_day(date()).unwrap();
        assert_eq!(day.timesheet.status, TimesheetStatus::Completed);
        assert_eq!(day.timesheet.total_duration, 8 * 3600);
        assert_eq!(day.start_time, Some(t0()));
        assert_eq!(day.end_time, Some(t0() + Duration::hours(9)));
        assert_eq!(day.summary.unwrap().total_work_seconds, 8 * 3600);
    }

    #[test]
    fn reopened_tracker_sees_running_session() {
        let c = conn();
        {
            let mut t = Tracker::open(SqliteGateway::new(&c), date(), DEFAULT_MAX_RETRIES).unwrap();
            t.start(t0()).unwrap();
        }

        let t = Tracker::open(SqliteGateway::new(&c), date(), DEFAULT_MAX_RETRIES).unwrap();
        assert_eq!(t.work_day().timesheet.status, TimesheetStatus::InProgress);
        assert_eq!(t.tick(t0() + Duration::seconds(30)).total_seconds, 30);
    }

    #[test]
    fn write_to_missing_row_rolls_back() {
        let c = conn();
        let mut t = Tracker::open(SqliteGateway::new(&c), date(), DEFAULT_MAX_RETRIES).unwrap();
        c.execute("DELETE FROM work_days", []).unwrap();

        let err = t.start(t0()).unwrap_err();
        assert!(matches!(err, TrackerError::PersistenceFailure { .. }));
        assert_eq!(t.work_day().timesheet.status, TimesheetStatus::NotStarted);
    }

    #[test]
    fn stale_tracker_cannot_start_twice() {
        let c = conn();
        let mut a = Tracker::open(SqliteGateway::new(&c), date(), DEFAULT_MAX_RETRIES).unwrap();
        let mut b = Tracker::open(SqliteGateway::new(&c), date(), DEFAULT_MAX_RETRIES).unwrap();

        a.start(t0()).unwrap();
        let err = b.start(t0() + Duration::minutes(30)).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidTransition { .. }));

        // b now reflects the session a started
        assert_eq!(b.work_day().timesheet.current_session_start, Some(t0()));
        let stored = SqliteGateway::new(&c).load_work_day(date()).unwrap();
        assert_eq!(stored.timesheet.current_session_start, Some(t0()));
    }

    #[test]
    fn stale_tracker_pause_sees_fresh_state() {
        let c = conn();
        let mut a = Tracker::open(SqliteGateway::new(&c), date(), DEFAULT_MAX_RETRIES).unwrap();
        let mut b = Tracker::open(SqliteGateway::new(&c), date(), DEFAULT_MAX_RETRIES).unwrap();

        a.start(t0()).unwrap();
        a.pause(t0() + Duration::hours(1)).unwrap();

        // b still believes the day was never started
        let err = b.pause(t0() + Duration::hours(2)).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidTransition { .. }));
        assert_eq!(b.work_day().timesheet.status, TimesheetStatus::Paused);
        assert_eq!(b.work_day().timesheet.total_duration, 3600);
    }

    #[test]
    fn failure_inside_finish_leaves_day_loadable() {
        let c = conn();
        let mut t = Tracker::open(SqliteGateway::new(&c), date(), DEFAULT_MAX_RETRIES).unwrap();
        t.start(t0()).unwrap();
        c.execute_batch(
            "CREATE TRIGGER fail_summary BEFORE INSERT ON day_summaries
             BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
        )
        .unwrap();

        let err = t.finish(t0() + Duration::hours(1)).unwrap_err();
        assert!(matches!(err, TrackerError::PersistenceFailure { .. }));
        assert_eq!(t.work_day().timesheet.status, TimesheetStatus::InProgress);

        let stored = SqliteGateway::new(&c).load_work_day(date()).unwrap();
        assert_eq!(stored.timesheet.status, TimesheetStatus::InProgress);
        assert_eq!(stored.status, DayStatus::InProgress);
        assert_eq!(stored.end_time, None);
        assert_eq!(stored.summary, None);

        c.execute_batch("DROP TRIGGER fail_summary;").unwrap();
        t.finish(t0() + Duration::hours(1)).unwrap();
        let stored = SqliteGateway::new(&c).load_work_day(date()).unwrap();
        assert_eq!(stored.timesheet.status, TimesheetStatus::Completed);
    }
}
