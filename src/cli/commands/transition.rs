use crate::cli::commands::{Now, resolve_date};
use crate::config::Config;
use crate::core::navigator::Controls;
use crate::core::timesheet::Action;
use crate::core::tracker::Tracker;
use crate::db::gateway::SqliteGateway;
use crate::db::initialize::open_db;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::render::controls_line;
use crate::utils::time::format_hms;

/// Handle `start`, `pause` and `finish` on the targeted day.
pub fn handle(action: Action, date: Option<&str>, cfg: &Config, now: Now) -> AppResult<()> {
    let pool = open_db(cfg)?;
    let date = resolve_date(&pool.conn, date, now.at())?;

    let mut tracker =
        Tracker::open(SqliteGateway::new(&pool.conn), date, cfg.max_save_retries)?;
    let day = tracker.transition(action, now.at())?;

    let total = format_hms(day.timesheet.total_duration);
    let message = match action {
        Action::Start => format!(
            "Timesheet running for {} since {}",
            day.date_str(),
            now.at().format("%H:%M:%S")
        ),
        Action::Pause => format!("Timesheet paused for {}, worked {total}", day.date_str()),
        Action::Finish => match &day.summary {
            Some(s) => format!(
                "Day {} completed: worked {total}, {} tasks, {} evidences",
                day.date_str(),
                s.tasks_completed,
                s.evidences_submitted
            ),
            None => format!("Day {} completed: worked {total}", day.date_str()),
        },
    };

    success(&message);
    info(format!("Controls: {}", controls_line(&Controls::for_work_day(day))));
    ttlog_quiet(&pool.conn, action.as_str(), &day.date_str(), &message);

    Ok(())
}
