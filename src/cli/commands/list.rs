use crate::cli::commands::Now;
use crate::config::Config;
use crate::core::clock::displayed_total;
use crate::db::initialize::open_db;
use crate::db::queries::list_work_days;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::date::{current_month_bounds, date_label, parse_period};
use crate::utils::table::Table;
use crate::utils::time::{clock_or_placeholder, format_hms};

/// List stored work days in `period` (current month when unset).
pub fn handle(period: Option<&str>, cfg: &Config, now: Now) -> AppResult<()> {
    let pool = open_db(cfg)?;

    let bounds = match period {
        Some(p) => parse_period(p)?,
        None => Some(current_month_bounds(now.at().date_naive())),
    };

    let days = list_work_days(&pool.conn, bounds)?;
    if days.is_empty() {
        info("No work days for the selected period.");
        return Ok(());
    }

    let mut table = Table::new([
        "Date",
        "Day",
        "Timesheet",
        "Start",
        "End",
        "Worked",
        "Tasks",
        "Evidences",
    ]);

    let mut grand_total = 0;
    for d in &days {
        let worked = displayed_total(&d.timesheet, now.at());
        grand_total += worked;

        let (tasks, evidences) = match &d.summary {
            Some(s) => (s.tasks_completed.to_string(), s.evidences_submitted.to_string()),
            None => ("-".to_string(), "-".to_string()),
        };

        table.add_row(vec![
            date_label(&d.date, cfg.show_weekday),
            d.status.label().to_string(),
            d.timesheet.status.label().to_string(),
            clock_or_placeholder(d.start_time.as_ref()),
            clock_or_placeholder(d.end_time.as_ref()),
            format_hms(worked),
            tasks,
            evidences,
        ]);
    }

    print!("{}", table.render());
    println!(
        "\nTotal worked: {} over {} day(s)",
        format_hms(grand_total),
        days.len()
    );

    Ok(())
}
