//! SQLite-backed persistence.
//!
//! Provides:
//! - The active-day log (one row per calendar day)
//! - Key-value store for streak, challenge and XP state

use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use tracing::debug;

use super::{data_dir, ActivityLog, KvStore};
use crate::clock::{format_iso_date, parse_iso_date};
use crate::error::{DatabaseError, Result};

/// SQLite database for wyrmday state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data dir>/wyrmday.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created or the
    /// database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("wyrmday.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS activity_days (
                    day         TEXT PRIMARY KEY,
                    recorded_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }
}

impl ActivityLog for Database {
    fn record_activity(&self, day: NaiveDate) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO activity_days (day) VALUES (?1)",
            params![format_iso_date(day)],
        )?;
        Ok(())
    }

    fn activity_since(&self, since: NaiveDate) -> Result<BTreeSet<NaiveDate>> {
        let mut stmt = self
            .conn
            .prepare("SELECT day FROM activity_days WHERE day >= ?1 ORDER BY day")?;
        let rows = stmt.query_map(params![format_iso_date(since)], |row| {
            row.get::<_, String>(0)
        })?;

        let mut days = BTreeSet::new();
        for row in rows {
            let raw = row?;
            days.insert(parse_iso_date(&raw)?);
        }
        Ok(days)
    }
}

impl KvStore for Database {
    fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
