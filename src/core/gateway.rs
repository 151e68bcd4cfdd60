//! Contract between the tracker and the backing store.

use crate::models::activity::ActivityCounts;
use crate::models::timesheet::TimesheetStatus;
use crate::models::work_day::WorkDay;
use chrono::NaiveDate;
use rusqlite::ErrorCode;
#[cfg(test)]
use std::collections::{BTreeMap, VecDeque};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no work day stored for {0}")]
    NotFound(NaiveDate),

    #[error("store temporarily unavailable: {0}")]
    Retryable(String),

    #[error("store write failed: {0}")]
    Fatal(String),

    #[error("work day {0} was changed by another session")]
    Conflict(NaiveDate),
}

impl GatewayError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Retryable(_))
    }
}

/// Busy/locked databases are transient; everything else is not.
impl From<rusqlite::Error> for GatewayError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(err, _)
                if matches!(
                    err.code,
                    ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
                ) =>
            {
                GatewayError::Retryable(e.to_string())
            }
            _ => GatewayError::Fatal(e.to_string()),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Remote store the tracker reads from and writes to.
pub trait PersistenceGateway {
    /// Fails with [`GatewayError::NotFound`] when no record exists yet.
    fn load_work_day(&mut self, date: NaiveDate) -> GatewayResult<WorkDay>;

    /// Materialize a fresh record; returns its store id.
    fn insert_work_day(&mut self, day: &WorkDay) -> GatewayResult<i64>;

    /// Write timesheet, day header and summary of `day` as one unit.
    ///
    /// Applies only while the stored timesheet is still in `expected`;
    /// otherwise nothing is written and [`GatewayError::Conflict`] is
    /// returned. A day that is not completed never keeps a summary.
    fn commit_transition(&mut self, expected: TimesheetStatus, day: &WorkDay)
    -> GatewayResult<()>;

    fn activity_counts(&mut self, date: NaiveDate) -> GatewayResult<ActivityCounts>;
}

/// In-process store with scripted commit failures.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryGateway {
    days: BTreeMap<NaiveDate, WorkDay>,
    counts: BTreeMap<NaiveDate, ActivityCounts>,
    failures: VecDeque<GatewayError>,
    next_id: i64,
    pub(crate) commits: usize,
}

#[cfg(test)]
impl MemoryGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make the next commit fail with `err`. Queued failures are consumed
    /// in order.
    pub(crate) fn fail_next(&mut self, err: GatewayError) {
        self.failures.push_back(err);
    }

    pub(crate) fn set_counts(&mut self, date: NaiveDate, counts: ActivityCounts) {
        self.counts.insert(date, counts);
    }

    /// Stored copy, as another reader of the store would see it.
    pub(crate) fn stored(&self, date: NaiveDate) -> Option<&WorkDay> {
        self.days.get(&date)
    }
}

#[cfg(test)]
impl PersistenceGateway for MemoryGateway {
    fn load_work_day(&mut self, date: NaiveDate) -> GatewayResult<WorkDay> {
        self.days
            .get(&date)
            .cloned()
            .ok_or(GatewayError::NotFound(date))
    }

    fn insert_work_day(&mut self, day: &WorkDay) -> GatewayResult<i64> {
        if self.days.contains_key(&day.date) {
            return Err(GatewayError::Fatal(format!(
                "work day {} already exists",
                day.date
            )));
        }
        self.next_id += 1;
        let mut stored = day.clone();
        stored.id = self.next_id;
        self.days.insert(day.date, stored);
        Ok(self.next_id)
    }

    fn commit_transition(
        &mut self,
        expected: TimesheetStatus,
        day: &WorkDay,
    ) -> GatewayResult<()> {
        if let Some(err) = self.failures.pop_front() {
            return Err(err);
        }
        let stored = self
            .days
            .values_mut()
            .find(|d| d.id == day.id)
            .ok_or_else(|| GatewayError::Fatal(format!("unknown work day id {}", day.id)))?;
        if stored.timesheet.status != expected {
            return Err(GatewayError::Conflict(day.date));
        }

        stored.timesheet = day.timesheet.clone();
        stored.status = day.status;
        stored.start_time = day.start_time;
        stored.end_time = day.end_time;
        stored.summary = if day.status.is_completed() {
            day.summary
        } else {
            None
        };
        self.commits += 1;
        Ok(())
    }

    fn activity_counts(&mut self, date: NaiveDate) -> GatewayResult<ActivityCounts> {
        Ok(self.counts.get(&date).copied().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn missing_day_is_not_found() {
        let mut gw = MemoryGateway::new();
        assert!(matches!(
            gw.load_work_day(day()),
            Err(GatewayError::NotFound(d)) if d == day()
        ));
    }

    #[test]
    fn commit_against_stale_status_is_a_conflict() {
        let mut gw = MemoryGateway::new();
        let mut d = WorkDay::new(day());
        d.id = gw.insert_work_day(&d).unwrap();
        d.timesheet.status = TimesheetStatus::InProgress;

        assert!(matches!(
            gw.commit_transition(TimesheetStatus::Paused, &d),
            Err(GatewayError::Conflict(_))
        ));
        assert_eq!(gw.commits, 0);
        assert_eq!(
            gw.stored(day()).unwrap().timesheet.status,
            TimesheetStatus::NotStarted
        );
    }

    #[test]
    fn scripted_failure_hits_only_next_commit() {
        let mut gw = MemoryGateway::new();
        let mut d = WorkDay::new(day());
        d.id = gw.insert_work_day(&d).unwrap();
        gw.fail_next(GatewayError::Fatal("boom".into()));

        assert!(gw.commit_transition(TimesheetStatus::NotStarted, &d).is_err());
        assert!(gw.commit_transition(TimesheetStatus::NotStarted, &d).is_ok());
        assert_eq!(gw.commits, 1);
    }

    #[test]
    fn busy_sqlite_errors_are_retryable() {
        let busy = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        assert!(GatewayError::from(busy).is_retryable());

        let other = rusqlite::Error::QueryReturnedNoRows;
        assert!(!GatewayError::from(other).is_retryable());
    }
}
