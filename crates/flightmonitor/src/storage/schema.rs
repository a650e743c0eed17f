//! `SQLite` schema definitions for flightmonitor.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the readings table.
///
/// `id` doubles as the sequence position; `AUTOINCREMENT` keeps positions
/// from being reused after retention pruning.
pub const CREATE_READINGS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS readings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    altitude INTEGER NOT NULL CHECK (altitude BETWEEN 0 AND 3000),
    heading INTEGER NOT NULL CHECK (heading BETWEEN 0 AND 360),
    attitude INTEGER NOT NULL CHECK (attitude BETWEEN -100 AND 100),
    recorded_at TEXT NOT NULL
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_READINGS_TABLE, CREATE_METADATA_TABLE];
