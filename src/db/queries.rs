use crate::errors::AppError;
use crate::models::activity::{ActivityCounts, Evidence, TaskCompletion};
use crate::models::day_status::DayStatus;
use crate::models::timesheet::{Timesheet, TimesheetStatus};
use crate::models::work_day::{DaySummary, WorkDay};
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const WORK_DAY_SELECT: &str = "
    SELECT w.id, w.date, w.status, w.start_time, w.end_time,
           t.status AS ts_status, t.current_session_start, t.total_duration,
           s.tasks_completed, s.total_work_seconds, s.evidences_submitted
    FROM work_days w
    JOIN timesheets t ON t.work_day_id = w.id
    LEFT JOIN day_summaries s ON s.work_day_id = w.id";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

pub fn date_to_db(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn parse_db_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(s.to_string())))
}

fn parse_db_ts(s: &str) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| conversion_error(0, AppError::InvalidTimestamp(s.to_string())))
}

fn parse_opt_ts(s: Option<String>) -> Result<Option<DateTime<Local>>> {
    s.as_deref().map(parse_db_ts).transpose()
}

pub fn map_work_day(row: &Row) -> Result<WorkDay> {
    let date_str: String = row.get("date")?;

    let status_str: String = row.get("status")?;
    let status = DayStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(
            0,
            AppError::CorruptRecord(format!("invalid day status: {status_str}")),
        )
    })?;

    let ts_status_str: String = row.get("ts_status")?;
    let ts_status = TimesheetStatus::from_db_str(&ts_status_str).ok_or_else(|| {
        conversion_error(
            0,
            AppError::CorruptRecord(format!("invalid timesheet status: {ts_status_str}")),
        )
    })?;

    let summary = match row.get::<_, Option<u32>>("tasks_completed")? {
        Some(tasks_completed) => Some(DaySummary {
            tasks_completed,
            total_work_seconds: row.get("total_work_seconds")?,
            evidences_submitted: row.get("evidences_submitted")?,
        }),
        None => None,
    };

    let day = WorkDay {
        id: row.get("id")?,
        date: parse_db_date(&date_str)?,
        status,
        start_time: parse_opt_ts(row.get("start_time")?)?,
        end_time: parse_opt_ts(row.get("end_time")?)?,
        timesheet: Timesheet {
            status: ts_status,
            current_session_start: parse_opt_ts(row.get("current_session_start")?)?,
            total_duration: row.get("total_duration")?,
        },
        summary,
    };

    day.check_invariants().map_err(|msg| {
        conversion_error(0, AppError::CorruptRecord(format!("{date_str}: {msg}")))
    })?;

    Ok(day)
}

pub fn load_work_day(conn: &Connection, date: &NaiveDate) -> Result<Option<WorkDay>> {
    let sql = format!("{WORK_DAY_SELECT} WHERE w.date = ?1");
    conn.query_row(&sql, [date_to_db(date)], map_work_day)
        .optional()
}

/// Work days stored between `start` and `end` (inclusive), or all of them.
pub fn list_work_days(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> Result<Vec<WorkDay>> {
    let mut out = Vec::new();

    match bounds {
        None => {
            let sql = format!("{WORK_DAY_SELECT} ORDER BY w.date ASC");
            let mut stmt = conn.prepare(&sql)?;
            for r in stmt.query_map([], map_work_day)? {
                out.push(r?);
            }
        }
        Some((start, end)) => {
            let sql = format!("{WORK_DAY_SELECT} WHERE w.date BETWEEN ?1 AND ?2 ORDER BY w.date ASC");
            let mut stmt = conn.prepare(&sql)?;
            for r in stmt.query_map(params![date_to_db(&start), date_to_db(&end)], map_work_day)? {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

/// Insert the day header and its timesheet row atomically.
pub fn insert_work_day(conn: &Connection, day: &WorkDay) -> Result<i64> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO work_days (date, status, start_time, end_time, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            date_to_db(&day.date),
            day.status.to_db_str(),
            day.start_time.map(|t| t.to_rfc3339()),
            day.end_time.map(|t| t.to_rfc3339()),
            Local::now().to_rfc3339(),
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.execute(
        "INSERT INTO timesheets (work_day_id, status, current_session_start, total_duration)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            id,
            day.timesheet.status.to_db_str(),
            day.timesheet.current_session_start.map(|t| t.to_rfc3339()),
            day.timesheet.total_duration,
        ],
    )?;
    tx.commit()?;
    Ok(id)
}

/// Write a transition of `day` in one transaction, guarded by the
/// timesheet status it was computed from. Returns `false` (nothing written)
/// when the stored timesheet is no longer in `expected`.
pub fn commit_transition(
    conn: &Connection,
    expected: TimesheetStatus,
    day: &WorkDay,
) -> Result<bool> {
    let tx = conn.unchecked_transaction()?;

    let n = tx.execute(
        "UPDATE timesheets
         SET status = ?1, current_session_start = ?2, total_duration = ?3
         WHERE work_day_id = ?4 AND status = ?5",
        params![
            day.timesheet.status.to_db_str(),
            day.timesheet.current_session_start.map(|t| t.to_rfc3339()),
            day.timesheet.total_duration,
            day.id,
            expected.to_db_str(),
        ],
    )?;
    if n == 0 {
        return Ok(false);
    }

    tx.execute(
        "UPDATE work_days SET status = ?1, start_time = ?2, end_time = ?3 WHERE id = ?4",
        params![
            day.status.to_db_str(),
            day.start_time.map(|t| t.to_rfc3339()),
            day.end_time.map(|t| t.to_rfc3339()),
            day.id,
        ],
    )?;

    match day.summary.as_ref().filter(|_| day.status.is_completed()) {
        Some(s) => {
            tx.execute(
                "INSERT INTO day_summaries (work_day_id, tasks_completed, total_work_seconds, evidences_submitted)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(work_day_id) DO UPDATE SET
                    tasks_completed = excluded.tasks_completed,
                    total_work_seconds = excluded.total_work_seconds,
                    evidences_submitted = excluded.evidences_submitted",
                params![
                    day.id,
                    s.tasks_completed,
                    s.total_work_seconds,
                    s.evidences_submitted
                ],
            )?;
        }
        None => {
            tx.execute(
                "DELETE FROM day_summaries WHERE work_day_id = ?1",
                [day.id],
            )?;
        }
    }

    tx.commit()?;
    Ok(true)
}

// ---------------------------
// Tasks and evidences
// ---------------------------

pub fn insert_task(conn: &Connection, t: &TaskCompletion) -> Result<i64> {
    conn.execute(
        "INSERT INTO task_completions (date, title, completed_at) VALUES (?1, ?2, ?3)",
        params![date_to_db(&t.date), t.title, t.completed_at.to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_tasks(conn: &Connection, date: &NaiveDate) -> Result<Vec<TaskCompletion>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, title, completed_at FROM task_completions
         WHERE date = ?1 ORDER BY completed_at ASC, id ASC",
    )?;
    let rows = stmt.query_map([date_to_db(date)], |row| {
        let date: String = row.get(1)?;
        let at: String = row.get(3)?;
        Ok(TaskCompletion {
            id: row.get(0)?,
            date: parse_db_date(&date)?,
            title: row.get(2)?,
            completed_at: parse_db_ts(&at)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_evidence(conn: &Connection, e: &Evidence) -> Result<i64> {
    conn.execute(
        "INSERT INTO evidences (date, path, note, submitted_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            date_to_db(&e.date),
            e.path,
            e.note,
            e.submitted_at.to_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_evidences(conn: &Connection, date: &NaiveDate) -> Result<Vec<Evidence>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, path, note, submitted_at FROM evidences
         WHERE date = ?1 ORDER BY submitted_at ASC, id ASC",
    )?;
    let rows = stmt.query_map([date_to_db(date)], |row| {
        let date: String = row.get(1)?;
        let at: String = row.get(4)?;
        Ok(Evidence {
            id: row.get(0)?,
            date: parse_db_date(&date)?,
            path: row.get(2)?,
            note: row.get(3)?,
            submitted_at: parse_db_ts(&at)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn activity_counts(conn: &Connection, date: &NaiveDate) -> Result<ActivityCounts> {
    let d = date_to_db(date);
    let tasks_completed: u32 = conn.query_row(
        "SELECT COUNT(*) FROM task_completions WHERE date = ?1",
        [&d],
        |r| r.get(0),
    )?;
    let evidences_submitted: u32 =
        conn.query_row("SELECT COUNT(*) FROM evidences WHERE date = ?1", [&d], |r| {
            r.get(0)
        })?;

    Ok(ActivityCounts {
        tasks_completed,
        evidences_submitted,
    })
}

// ---------------------------
// UI state
// ---------------------------

const VIEWED_DATE_KEY: &str = "viewed_date";

pub fn get_ui_state(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM ui_state WHERE key = ?1", [key], |r| {
        r.get(0)
    })
    .optional()
}

pub fn set_ui_state(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO ui_state (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// The day the user is looking at, if one was ever selected.
pub fn viewed_date(conn: &Connection) -> Result<Option<NaiveDate>> {
    get_ui_state(conn, VIEWED_DATE_KEY)?
        .as_deref()
        .map(parse_db_date)
        .transpose()
}

pub fn set_viewed_date(conn: &Connection, date: &NaiveDate) -> Result<()> {
    set_ui_state(conn, VIEWED_DATE_KEY, &date_to_db(date))
}
