use crate::cli::commands::{Now, resolve_date, show_day};
use crate::config::Config;
use crate::core::tracker::Tracker;
use crate::db::gateway::SqliteGateway;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::ui::render::tick_line;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Show a day. With `watch`, the worked time is refreshed once per second
/// until `ticks` refreshes were shown (forever when unset). Watching never
/// writes to the store.
pub fn handle(
    date: Option<&str>,
    watch: bool,
    ticks: Option<u32>,
    cfg: &Config,
    now: Now,
) -> AppResult<()> {
    let pool = open_db(cfg)?;
    let date = resolve_date(&pool.conn, date, now.at())?;
    let tracker = Tracker::open(SqliteGateway::new(&pool.conn), date, cfg.max_save_retries)?;
    let day = tracker.work_day();

    show_day(day, cfg, now.at());

    if !watch {
        return Ok(());
    }
    if !day.timesheet.status.is_running() {
        info("Timesheet is not running; nothing to watch.");
        return Ok(());
    }

    let mut shown: u32 = 0;
    loop {
        let tick = tracker.tick(now.after(shown));
        print!("\r{}", tick_line(day, &tick));
        io::stdout().flush()?;

        shown += 1;
        if ticks.is_some_and(|max| shown >= max) {
            break;
        }
        thread::sleep(Duration::from_secs(1));
    }
    println!();

    Ok(())
}
