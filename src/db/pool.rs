//! SQLite connection wrapper (lightweight for CLI usage).

use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Open and wait up to `busy_timeout_ms` on a locked database before
    /// giving up with SQLITE_BUSY.
    pub fn with_busy_timeout(path: &str, busy_timeout_ms: u64) -> Result<Self> {
        let pool = Self::new(path)?;
        pool.conn
            .busy_timeout(Duration::from_millis(busy_timeout_ms))?;
        Ok(pool)
    }

    /// In-memory database, used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }
}
