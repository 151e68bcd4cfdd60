//! Tracker for the viewed work day.
//!
//! Owns the in-memory `WorkDay`, applies transitions optimistically and
//! commits them through a [`PersistenceGateway`] as one unit, guarded by the
//! timesheet status the transition was computed from. When the commit fails
//! the previous record is restored in memory; the store is left untouched.

use crate::core::clock::{SessionClock, Tick};
use crate::core::gateway::{GatewayError, GatewayResult, PersistenceGateway};
use crate::core::navigator::{self, Direction};
use crate::core::timesheet::{self, Action, TransitionError};
use crate::models::activity::ActivityCounts;
use crate::models::timesheet::TimesheetStatus;
use crate::models::work_day::WorkDay;
use chrono::{DateTime, Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Invalid transition: cannot {action} a timesheet that is {from}")]
    InvalidTransition {
        action: Action,
        from: TimesheetStatus,
    },

    #[error("Day is completed and read-only: cannot {action}")]
    TerminalStateViolation { action: Action },

    #[error("Failed to {operation}: {source}")]
    PersistenceFailure {
        operation: &'static str,
        retryable: bool,
        #[source]
        source: GatewayError,
    },
}

impl From<TransitionError> for TrackerError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::InvalidTransition { action, from } => {
                TrackerError::InvalidTransition { action, from }
            }
            TransitionError::TerminalStateViolation { action } => {
                TrackerError::TerminalStateViolation { action }
            }
        }
    }
}

impl TrackerError {
    fn persistence(operation: &'static str, source: GatewayError) -> Self {
        TrackerError::PersistenceFailure {
            operation,
            retryable: source.is_retryable(),
            source,
        }
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Run `op`, retrying retryable failures up to `max_retries` extra times.
fn with_retry<T>(
    max_retries: u32,
    what: &str,
    mut op: impl FnMut() -> GatewayResult<T>,
) -> GatewayResult<T> {
    let mut attempt = 0;
    loop {
        match op() {
            Err(e) if e.is_retryable() && attempt < max_retries => {
                attempt += 1;
                debug!(attempt, error = %e, "retrying {what}");
            }
            other => return other,
        }
    }
}

pub struct Tracker<G: PersistenceGateway> {
    gateway: G,
    day: WorkDay,
    max_retries: u32,
}

impl<G: PersistenceGateway> Tracker<G> {
    /// Load the record for `date`, materializing a fresh one if the store
    /// has none yet.
    pub fn open(mut gateway: G, date: NaiveDate, max_retries: u32) -> TrackerResult<Self> {
        let day = load_or_create(&mut gateway, date, max_retries)?;
        Ok(Self {
            gateway,
            day,
            max_retries,
        })
    }

    pub fn work_day(&self) -> &WorkDay {
        &self.day
    }

    #[cfg(test)]
    pub(crate) fn gateway(&self) -> &G {
        &self.gateway
    }

    #[cfg(test)]
    pub(crate) fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    /// Displayed duration for the presentation layer. Does not persist.
    pub fn tick(&self, now: DateTime<Local>) -> Tick {
        SessionClock::tick(&self.day, now)
    }

    pub fn start(&mut self, now: DateTime<Local>) -> TrackerResult<&WorkDay> {
        self.transition(Action::Start, now)
    }

    pub fn pause(&mut self, now: DateTime<Local>) -> TrackerResult<&WorkDay> {
        self.transition(Action::Pause, now)
    }

    pub fn finish(&mut self, now: DateTime<Local>) -> TrackerResult<&WorkDay> {
        self.transition(Action::Finish, now)
    }

    /// Switch the viewed day. A running session on the current day keeps
    /// running; it is neither paused nor flushed.
    pub fn navigate(&mut self, direction: Direction, today: NaiveDate) -> TrackerResult<&WorkDay> {
        let target = navigator::navigate(self.day.date, direction, today);
        if target != self.day.date {
            self.day = load_or_create(&mut self.gateway, target, self.max_retries)?;
        }
        Ok(&self.day)
    }

    /// Apply `action` at `now` and commit it to the store.
    ///
    /// The record is re-read first, so a tracker opened before another
    /// session changed the day checks the action against the stored state.
    pub fn transition(&mut self, action: Action, now: DateTime<Local>) -> TrackerResult<&WorkDay> {
        self.refresh()?;
        // Reject before touching the store.
        timesheet::check(action, self.day.timesheet.status)?;

        let counts = if action == Action::Finish {
            let date = self.day.date;
            let gw = &mut self.gateway;
            with_retry(self.max_retries, "activity_counts", || {
                gw.activity_counts(date)
            })
            .map_err(|e| TrackerError::persistence("read day activity", e))?
        } else {
            ActivityCounts::default()
        };

        let next = timesheet::apply(&self.day, action, now, counts)?;
        let previous = std::mem::replace(&mut self.day, next);

        let retries = self.max_retries;
        let expected = previous.timesheet.status;
        let day = &self.day;
        let gw = &mut self.gateway;
        let committed = with_retry(retries, "commit_transition", || {
            gw.commit_transition(expected, day)
        });

        match committed {
            Ok(()) => {
                info!(
                    date = %self.day.date,
                    action = action.as_str(),
                    status = self.day.timesheet.status.to_db_str(),
                    total = self.day.timesheet.total_duration,
                    "timesheet transition committed"
                );
                Ok(&self.day)
            }
            Err(GatewayError::Conflict(date)) => {
                warn!(%date, action = action.as_str(), "work day changed concurrently");
                self.day = previous;
                let conflict = GatewayError::Conflict(date);
                if self.refresh().is_err() {
                    return Err(TrackerError::persistence(action_operation(action), conflict));
                }
                timesheet::check(action, self.day.timesheet.status)?;
                Err(TrackerError::persistence(action_operation(action), conflict))
            }
            Err(e) => {
                warn!(
                    date = %previous.date,
                    action = action.as_str(),
                    error = %e,
                    "timesheet commit failed, rolling back"
                );
                self.day = previous;
                Err(TrackerError::persistence(action_operation(action), e))
            }
        }
    }

    /// Replace the in-memory record with the stored one.
    fn refresh(&mut self) -> TrackerResult<()> {
        let date = self.day.date;
        let gw = &mut self.gateway;
        self.day = with_retry(self.max_retries, "load_work_day", || gw.load_work_day(date))
            .map_err(|e| TrackerError::persistence("load work day", e))?;
        Ok(())
    }
}

fn action_operation(action: Action) -> &'static str {
    match action {
        Action::Start => "save start",
        Action::Pause => "save pause",
        Action::Finish => "save finish",
    }
}

fn load_or_create<G: PersistenceGateway>(
    gateway: &mut G,
    date: NaiveDate,
    max_retries: u32,
) -> TrackerResult<WorkDay> {
    match with_retry(max_retries, "load_work_day", || gateway.load_work_day(date)) {
        Ok(day) => Ok(day),
        Err(GatewayError::NotFound(_)) => {
            let mut day = WorkDay::new(date);
            day.id = with_retry(max_retries, "insert_work_day", || {
                gateway.insert_work_day(&day)
            })
            .map_err(|e| TrackerError::persistence("create work day", e))?;
            debug!(date = %date, id = day.id, "materialized work day");
            Ok(day)
        }
        Err(e) => Err(TrackerError::persistence("load work day", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gateway::MemoryGateway;
    use crate::models::day_status::DayStatus;
    use chrono::{Duration, TimeZone};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap()
    }

    fn tracker() -> Tracker<MemoryGateway> {
        Tracker::open(MemoryGateway::new(), date(), DEFAULT_MAX_RETRIES).unwrap()
    }

    #[test]
    fn open_materializes_missing_day() {
        let t = tracker();
        assert_eq!(t.work_day().timesheet.status, TimesheetStatus::NotStarted);
        assert!(t.work_day().id > 0);
        assert!(t.gateway().stored(date()).is_some());
    }

    #[test]
    fn start_commits_to_store() {
        let mut t = tracker();
        t.start(t0()).unwrap();

        let stored = t.gateway().stored(date()).unwrap();
        assert_eq!(stored.timesheet.status, TimesheetStatus::InProgress);
        assert_eq!(stored.timesheet.current_session_start, Some(t0()));
        assert_eq!(stored.status, DayStatus::InProgress);
        assert_eq!(stored.start_time, Some(t0()));
    }

    #[test]
    fn failed_start_rolls_back() {
        let mut t = tracker();
        t.gateway_mut()
            .fail_next(GatewayError::Fatal("offline".into()));

        let err = t.start(t0()).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::PersistenceFailure {
                retryable: false,
                ..
            }
        ));
        assert_eq!(t.work_day().timesheet.status, TimesheetStatus::NotStarted);
        assert_eq!(t.work_day().timesheet.current_session_start, None);
        assert_eq!(t.work_day().start_time, None);
        assert_eq!(
            t.gateway().stored(date()).unwrap().timesheet.status,
            TimesheetStatus::NotStarted
        );
    }

    #[test]
    fn retryable_failure_is_retried() {
        let mut t = tracker();
        t.gateway_mut()
            .fail_next(GatewayError::Retryable("busy".into()));
        t.gateway_mut()
            .fail_next(GatewayError::Retryable("busy".into()));

        t.start(t0()).unwrap();
        assert_eq!(t.work_day().timesheet.status, TimesheetStatus::InProgress);
    }

    #[test]
    fn retries_are_bounded() {
        let mut t = Tracker::open(MemoryGateway::new(), date(), 1).unwrap();
        for _ in 0..2 {
            t.gateway_mut()
                .fail_next(GatewayError::Retryable("busy".into()));
        }

        let err = t.start(t0()).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::PersistenceFailure {
                retryable: true,
                ..
            }
        ));
        assert_eq!(t.work_day().timesheet.status, TimesheetStatus::NotStarted);
    }

    #[test]
    fn failed_finish_leaves_store_untouched() {
        let mut t = tracker();
        t.start(t0()).unwrap();
        t.gateway_mut()
            .fail_next(GatewayError::Fatal("offline".into()));

        assert!(t.finish(t0() + Duration::hours(1)).is_err());

        let mem = t.work_day();
        assert_eq!(mem.timesheet.status, TimesheetStatus::InProgress);
        assert_eq!(mem.end_time, None);
        assert_eq!(mem.summary, None);

        let stored = t.gateway().stored(date()).unwrap();
        assert_eq!(stored.timesheet.status, TimesheetStatus::InProgress);
        assert_eq!(stored.status, DayStatus::InProgress);
        assert_eq!(stored.end_time, None);
        assert!(stored.check_invariants().is_ok());
    }

    #[test]
    fn conflicting_commit_is_not_applied() {
        let mut t = tracker();
        t.gateway_mut().fail_next(GatewayError::Conflict(date()));

        let err = t.start(t0()).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::PersistenceFailure {
                retryable: false,
                source: GatewayError::Conflict(_),
                ..
            }
        ));
        assert_eq!(t.work_day().timesheet.status, TimesheetStatus::NotStarted);
        assert_eq!(t.gateway().commits, 0);
    }

    #[test]
    fn finish_uses_activity_counts() {
        let mut t = tracker();
        t.gateway_mut().set_counts(
            date(),
            ActivityCounts {
                tasks_completed: 2,
                evidences_submitted: 4,
            },
        );
        t.start(t0()).unwrap();
        let done = t.finish(t0() + Duration::minutes(90)).unwrap();

        let summary = done.summary.unwrap();
        assert_eq!(summary.tasks_completed, 2);
        assert_eq!(summary.evidences_submitted, 4);
        assert_eq!(summary.total_work_seconds, 90 * 60);
        assert_eq!(
            t.gateway().stored(date()).unwrap().summary,
            Some(summary)
        );
    }

    #[test]
    fn completed_day_rejects_transitions_without_writing() {
        let mut t = tracker();
        t.start(t0()).unwrap();
        t.finish(t0() + Duration::hours(1)).unwrap();
        let commits = t.gateway().commits;

        for action in [Action::Start, Action::Pause, Action::Finish] {
            let err = t.transition(action, t0() + Duration::hours(2)).unwrap_err();
            assert!(matches!(
                err,
                TrackerError::TerminalStateViolation { action: a } if a == action
            ));
        }
        assert_eq!(t.gateway().commits, commits);
    }

    #[test]
    fn invalid_transition_leaves_state_unchanged() {
        let mut t = tracker();
        let before = t.work_day().clone();

        let err = t.pause(t0()).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidTransition { .. }));
        assert_eq!(t.work_day(), &before);
    }

    #[test]
    fn navigating_away_keeps_session_running() {
        let mut t = tracker();
        t.start(t0()).unwrap();

        let today = date();
        let prev = t.navigate(Direction::Previous, today).unwrap();
        assert_eq!(prev.date, date().pred_opt().unwrap());
        assert_eq!(prev.timesheet.status, TimesheetStatus::NotStarted);

        let back = t.navigate(Direction::Today, today).unwrap();
        assert_eq!(back.timesheet.status, TimesheetStatus::InProgress);
        assert_eq!(back.timesheet.current_session_start, Some(t0()));
        assert_eq!(t.tick(t0() + Duration::seconds(30)).total_seconds, 30);
    }
}
