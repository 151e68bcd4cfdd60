use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. It also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_work_days",
        description: "Created work_days, timesheets and day_summaries tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS work_days (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT NOT NULL UNIQUE,
            status      TEXT NOT NULL DEFAULT 'programmed'
                        CHECK(status IN ('programmed','in_progress','completed')),
            start_time  TEXT,
            end_time    TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS timesheets (
            work_day_id            INTEGER PRIMARY KEY
                                   REFERENCES work_days(id) ON DELETE CASCADE,
            status                 TEXT NOT NULL DEFAULT 'not_started'
                                   CHECK(status IN ('not_started','in_progress','paused','completed')),
            current_session_start  TEXT,
            total_duration         INTEGER NOT NULL DEFAULT 0 CHECK(total_duration >= 0)
        );

        CREATE TABLE IF NOT EXISTS day_summaries (
            work_day_id          INTEGER PRIMARY KEY
                                 REFERENCES work_days(id) ON DELETE CASCADE,
            tasks_completed      INTEGER NOT NULL DEFAULT 0,
            total_work_seconds   INTEGER NOT NULL DEFAULT 0,
            evidences_submitted  INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_work_days_status ON work_days(status);
        "#,
    },
    Migration {
        version: "20250318_0002_create_activity_tables",
        description: "Created task_completions and evidences tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS task_completions (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            date          TEXT NOT NULL,
            title         TEXT NOT NULL,
            completed_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS evidences (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            date          TEXT NOT NULL,
            path          TEXT NOT NULL,
            note          TEXT NOT NULL DEFAULT '',
            submitted_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_task_completions_date ON task_completions(date);
        CREATE INDEX IF NOT EXISTS idx_evidences_date ON evidences(date);
        "#,
    },
    Migration {
        version: "20250415_0003_add_ui_state",
        description: "Created ui_state table (viewed day)",
        sql: r#"
        CREATE TABLE IF NOT EXISTS ui_state (
            key    TEXT PRIMARY KEY,
            value  TEXT NOT NULL
        );
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        rusqlite::params![chrono::Local::now().to_rfc3339(), m.version, m.description],
    )?;
    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Versions not yet recorded as applied.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations, in order.
///
/// Returns how many were applied.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        applied += 1;
    }

    Ok(applied)
}
