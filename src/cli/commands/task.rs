use crate::cli::commands::{Now, resolve_date};
use crate::cli::parser::TaskAction;
use crate::config::Config;
use crate::core::activity::ActivityLogic;
use crate::db::initialize::open_db;
use crate::db::log::ttlog_quiet;
use crate::db::queries::list_tasks;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(action: &TaskAction, cfg: &Config, now: Now) -> AppResult<()> {
    let pool = open_db(cfg)?;

    match action {
        TaskAction::Done { title, date } => {
            let date = resolve_date(&pool.conn, date.as_deref(), now.at())?;
            let task = ActivityLogic::record_task(&pool.conn, date, title, now.at())?;

            success(format!("Task done on {}: {}", date, task.title));
            ttlog_quiet(&pool.conn, "task_done", &date.to_string(), &task.title);
        }
        TaskAction::List { date } => {
            let date = resolve_date(&pool.conn, date.as_deref(), now.at())?;
            let tasks = list_tasks(&pool.conn, &date)?;

            if tasks.is_empty() {
                info(format!("No tasks done on {date}."));
                return Ok(());
            }

            let mut table = Table::new(["ID", "Time", "Title"]);
            for t in &tasks {
                table.add_row(vec![
                    t.id.to_string(),
                    t.completed_at.format("%H:%M").to_string(),
                    t.title.clone(),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
