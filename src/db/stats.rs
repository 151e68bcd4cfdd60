use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::format_hms;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) WORK DAYS PER STATUS
    //
    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM work_days", [], |row| row.get(0))?;
    let completed: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM work_days WHERE status = 'completed'",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Work days:{} {}{}{} ({} completed)",
        CYAN, RESET, GREEN, count, RESET, completed
    );

    let tasks: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM task_completions", [], |row| row.get(0))?;
    let evidences: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM evidences", [], |row| row.get(0))?;
    println!("{}• Tasks done:{} {}", CYAN, RESET, tasks);
    println!("{}• Evidences:{} {}", CYAN, RESET, evidences);

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM work_days ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM work_days ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE WORKED TIME PER COMPLETED DAY
    //
    let avg: Option<f64> = pool.conn.query_row(
        "SELECT AVG(total_work_seconds) FROM day_summaries",
        [],
        |row| row.get(0),
    )?;
    if let Some(avg) = avg {
        println!(
            "{}• Average worked/day:{} {}",
            CYAN,
            RESET,
            format_hms(avg.round() as i64)
        );
    }

    println!();
    Ok(())
}
