use crate::cli::commands::{Now, show_day};
use crate::cli::parser::DayAction;
use crate::config::Config;
use crate::core::navigator::{Direction, can_navigate};
use crate::core::tracker::Tracker;
use crate::db::gateway::SqliteGateway;
use crate::db::initialize::open_db;
use crate::db::log::ttlog_quiet;
use crate::db::queries::{set_viewed_date, viewed_date};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Move the viewed day. The target day is materialized if new; a session
/// running on the day being left keeps running.
pub fn handle(action: &DayAction, cfg: &Config, now: Now) -> AppResult<()> {
    let pool = open_db(cfg)?;
    let today = now.at().date_naive();
    let current = viewed_date(&pool.conn)?.unwrap_or(today);

    let stepped = match action {
        DayAction::Prev => step(&pool.conn, cfg, current, Direction::Previous, today)?,
        DayAction::Next => step(&pool.conn, cfg, current, Direction::Next, today)?,
        DayAction::Today => step(&pool.conn, cfg, current, Direction::Today, today)?,
        DayAction::Goto { date } => {
            let target =
                parse_date(date).ok_or_else(|| AppError::InvalidDate(date.to_string()))?;
            Some(Tracker::open(
                SqliteGateway::new(&pool.conn),
                target,
                cfg.max_save_retries,
            )?)
        }
    };

    let Some(tracker) = stepped else {
        warning(format!("No calendar day beyond {current}."));
        return Ok(());
    };

    let day = tracker.work_day();
    set_viewed_date(&pool.conn, &day.date)?;

    ttlog_quiet(
        &pool.conn,
        "navigate",
        &day.date_str(),
        &format!("Viewing {} (was {current})", day.date_str()),
    );

    show_day(day, cfg, now.at());
    Ok(())
}

/// `None` when `direction` would leave the calendar; nothing is loaded
/// or created then.
fn step<'a>(
    conn: &'a Connection,
    cfg: &Config,
    current: NaiveDate,
    direction: Direction,
    today: NaiveDate,
) -> AppResult<Option<Tracker<SqliteGateway<'a>>>> {
    if !can_navigate(current, direction) {
        return Ok(None);
    }
    let mut tracker = Tracker::open(SqliteGateway::new(conn), current, cfg.max_save_retries)?;
    tracker.navigate(direction, today)?;
    Ok(Some(tracker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;

    fn conn() -> Connection {
        let c = Connection::open_in_memory().unwrap();
        run_pending_migrations(&c).unwrap();
        c
    }

    fn stored_days(c: &Connection) -> i64 {
        c.query_row("SELECT COUNT(*) FROM work_days", [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn step_stops_at_calendar_bounds() {
        let c = conn();
        let cfg = Config::default();
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        assert!(
            step(&c, &cfg, NaiveDate::MAX, Direction::Next, today)
                .unwrap()
                .is_none()
        );
        assert!(
            step(&c, &cfg, NaiveDate::MIN, Direction::Previous, today)
                .unwrap()
                .is_none()
        );
        assert_eq!(stored_days(&c), 0);
    }

    #[test]
    fn step_moves_one_day() {
        let c = conn();
        let cfg = Config::default();
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let t = step(&c, &cfg, today, Direction::Previous, today)
            .unwrap()
            .unwrap();
        assert_eq!(t.work_day().date, today.pred_opt().unwrap());
        assert_eq!(stored_days(&c), 2);
    }
}
