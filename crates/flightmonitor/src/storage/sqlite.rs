//! `SQLite`-backed reading store.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::{migrations, ReadingStore, StorageStats};
use crate::error::{Error, Result};
use crate::reading::{Reading, ValidReading};

/// How long a writer waits on a database locked by another process.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_READING: &str = "SELECT id, altitude, heading, attitude, recorded_at FROM readings";

/// Durable reading store.
///
/// The connection sits behind a mutex, so each append is one serialized
/// `INSERT` and the row id it produces becomes the sequence position.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a reading database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // WAL lets readers proceed while another process appends
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        migrations::initialize_schema(&conn)?;

        debug!("Database ready at {}", path.display());
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn: Mutex::new(conn),
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::storage_unavailable("database connection lock poisoned"))
    }

    fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == ":memory:"
    }

    fn row_to_reading(row: &rusqlite::Row) -> rusqlite::Result<Reading> {
        let sequence: i64 = row.get(0)?;
        let altitude: u16 = row.get(1)?;
        let heading: u16 = row.get(2)?;
        let attitude: i8 = row.get(3)?;
        let recorded_at_str: String = row.get(4)?;

        let recorded_at = DateTime::parse_from_rfc3339(&recorded_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

        Ok(ValidReading::new(altitude, heading, attitude).into_reading(sequence, recorded_at))
    }

    fn query_one(
        conn: &Connection,
        clause: &str,
        sequence: Option<i64>,
    ) -> Result<Option<Reading>> {
        let sql = format!("{SELECT_READING} {clause}");
        let reading = match sequence {
            Some(id) => conn.query_row(&sql, [id], Self::row_to_reading),
            None => conn.query_row(&sql, [], Self::row_to_reading),
        }
        .optional()?;
        Ok(reading)
    }

    fn insert(conn: &Connection, reading: ValidReading) -> Result<Reading> {
        let recorded_at = Utc::now();

        conn.execute(
            r"
            INSERT INTO readings (altitude, heading, attitude, recorded_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
            params![
                reading.altitude(),
                reading.heading(),
                reading.attitude(),
                recorded_at.to_rfc3339(),
            ],
        )?;

        let sequence = conn.last_insert_rowid();
        debug!("Appended reading {}", sequence);
        Ok(reading.into_reading(sequence, recorded_at))
    }

    fn prune(conn: &Connection, keep: usize) -> Result<usize> {
        let keep_i64 = i64::try_from(keep).unwrap_or(i64::MAX);
        let affected = conn.execute(
            r"
            DELETE FROM readings WHERE id NOT IN (
                SELECT id FROM readings ORDER BY id DESC LIMIT ?1
            )
            ",
            [keep_i64],
        )?;

        if affected > 0 {
            info!("Pruned {} readings to keep {} recent", affected, keep);
        }
        Ok(affected)
    }
}

impl ReadingStore for SqliteStore {
    fn append(&self, reading: ValidReading) -> Result<Reading> {
        let conn = self.conn()?;
        Self::insert(&conn, reading)
    }

    fn append_retaining(&self, reading: ValidReading, keep: usize) -> Result<Reading> {
        let mut conn = self.conn()?;
        // Dropping the transaction on error rolls the insert back
        let tx = conn.transaction()?;
        let stored = Self::insert(&tx, reading)?;
        if keep > 0 {
            Self::prune(&tx, keep)?;
        }
        tx.commit()?;
        Ok(stored)
    }

    fn list_all(&self) -> Result<Vec<Reading>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{SELECT_READING} ORDER BY id ASC"))?;
        let readings = stmt
            .query_map([], Self::row_to_reading)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(readings)
    }

    fn latest(&self) -> Result<Option<Reading>> {
        let conn = self.conn()?;
        Self::query_one(&conn, "ORDER BY id DESC LIMIT 1", None)
    }

    fn get(&self, sequence: i64) -> Result<Option<Reading>> {
        let conn = self.conn()?;
        Self::query_one(&conn, "WHERE id = ?1", Some(sequence))
    }

    fn count(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM readings", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    fn retain_recent(&self, keep: usize) -> Result<usize> {
        let conn = self.conn()?;
        Self::prune(&conn, keep)
    }

    fn stats(&self) -> Result<StorageStats> {
        let conn = self.conn()?;

        let total: i64 = conn.query_row("SELECT COUNT(*) FROM readings", [], |row| row.get(0))?;
        let total_readings = u64::try_from(total).unwrap_or(0);
        let first = Self::query_one(&conn, "ORDER BY id ASC LIMIT 1", None)?;
        let last = Self::query_one(&conn, "ORDER BY id DESC LIMIT 1", None)?;
        drop(conn);

        let db_size_bytes = if self.is_in_memory() {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_readings,
            last_sequence: last.as_ref().map(Reading::sequence),
            first_recorded: first.as_ref().map(Reading::recorded_at),
            last_recorded: last.as_ref().map(Reading::recorded_at),
            db_size_bytes,
        })
    }
}
