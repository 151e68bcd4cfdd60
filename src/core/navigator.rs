//! Day navigation and per-day control availability.
//!
//! No floor or ceiling is enforced on the navigable range; any limit belongs
//! to the caller. Leaving a running day does not pause it.

use crate::core::timesheet::{self, Action};
use crate::models::timesheet::TimesheetStatus;
use crate::models::work_day::WorkDay;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
    Today,
}

/// Date reached from `current` by `direction`. Stays on `current` if the
/// calendar has no such day.
pub fn navigate(current: NaiveDate, direction: Direction, today: NaiveDate) -> NaiveDate {
    match direction {
        Direction::Previous => current.pred_opt().unwrap_or(current),
        Direction::Next => current.succ_opt().unwrap_or(current),
        Direction::Today => today,
    }
}

pub fn can_navigate(current: NaiveDate, direction: Direction) -> bool {
    match direction {
        Direction::Previous => current.pred_opt().is_some(),
        Direction::Next => current.succ_opt().is_some(),
        Direction::Today => true,
    }
}

/// Which controls the presentation layer should enable for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub can_start: bool,
    pub can_pause: bool,
    pub can_finish: bool,
    pub read_only: bool,
    pub start_label: &'static str,
}

impl Controls {
    pub fn for_work_day(day: &WorkDay) -> Self {
        let status = day.timesheet.status;
        let enabled = |a: Action| timesheet::check(a, status).is_ok();

        Self {
            can_start: enabled(Action::Start),
            can_pause: enabled(Action::Pause),
            can_finish: enabled(Action::Finish),
            read_only: day.is_read_only(),
            start_label: if status == TimesheetStatus::Paused {
                "Resume"
            } else {
                "Start"
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timesheet::apply;
    use crate::models::activity::ActivityCounts;
    use chrono::{Local, TimeZone};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn moves_one_calendar_day() {
        let today = d(2025, 3, 10);
        assert_eq!(
            navigate(d(2025, 3, 1), Direction::Previous, today),
            d(2025, 2, 28)
        );
        assert_eq!(
            navigate(d(2024, 2, 28), Direction::Next, today),
            d(2024, 2, 29)
        );
        assert_eq!(
            navigate(d(2024, 12, 31), Direction::Next, today),
            d(2025, 1, 1)
        );
        assert_eq!(navigate(d(2020, 1, 1), Direction::Today, today), today);
    }

    #[test]
    fn no_range_limit_besides_the_calendar() {
        assert!(can_navigate(d(1990, 1, 1), Direction::Previous));
        assert!(can_navigate(d(2090, 1, 1), Direction::Next));
        assert!(!can_navigate(NaiveDate::MIN, Direction::Previous));
        assert!(!can_navigate(NaiveDate::MAX, Direction::Next));
        assert_eq!(
            navigate(NaiveDate::MAX, Direction::Next, d(2025, 1, 1)),
            NaiveDate::MAX
        );
    }

    #[test]
    fn controls_follow_timesheet_status() {
        let at = Local.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let day = WorkDay::new(d(2025, 3, 10));

        let c = Controls::for_work_day(&day);
        assert!(c.can_start && !c.can_pause && !c.can_finish && !c.read_only);
        assert_eq!(c.start_label, "Start");

        let running = apply(&day, Action::Start, at, ActivityCounts::default()).unwrap();
        let c = Controls::for_work_day(&running);
        assert!(!c.can_start && c.can_pause && c.can_finish);

        let paused = apply(&running, Action::Pause, at, ActivityCounts::default()).unwrap();
        let c = Controls::for_work_day(&paused);
        assert!(c.can_start && !c.can_pause && c.can_finish);
        assert_eq!(c.start_label, "Resume");

        let done = apply(&paused, Action::Finish, at, ActivityCounts::default()).unwrap();
        let c = Controls::for_work_day(&done);
        assert!(!c.can_start && !c.can_pause && !c.can_finish);
        assert!(c.read_only);
    }
}
