//! Storage layer for flightmonitor.
//!
//! A [`ReadingStore`] owns the append-only history of accepted readings.
//! Two backends are provided: [`SqliteStore`] for durable storage and
//! [`MemoryStore`] for embedding and tests.

mod memory;
pub mod migrations;
pub mod schema;
mod sqlite;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::reading::{Reading, ValidReading};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// The append-only reading history.
///
/// All operations take `&self`; implementations synchronize internally so a
/// store can be shared across threads. An append is atomic: a reading is
/// either fully visible to later reads or not at all.
pub trait ReadingStore: Send + Sync + std::fmt::Debug {
    /// Append a validated reading, assigning the next sequence position.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot accept the write.
    fn append(&self, reading: ValidReading) -> Result<Reading>;

    /// Append a validated reading and discard all but the `keep` most
    /// recent readings, as one atomic step. `keep == 0` disables pruning.
    ///
    /// On error nothing is stored, so the caller can retry safely.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot accept the write.
    fn append_retaining(&self, reading: ValidReading, keep: usize) -> Result<Reading>;

    /// The full history in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be read.
    fn list_all(&self) -> Result<Vec<Reading>>;

    /// The most recently appended reading.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be read.
    fn latest(&self) -> Result<Option<Reading>>;

    /// The reading at a sequence position.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be read.
    fn get(&self, sequence: i64) -> Result<Option<Reading>>;

    /// Number of readings held.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be read.
    fn count(&self) -> Result<u64>;

    /// Discard all but the `keep` most recent readings.
    ///
    /// Returns the number of readings discarded. Only called when a
    /// retention limit is configured.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot accept the write.
    fn retain_recent(&self, keep: usize) -> Result<usize>;

    /// Storage statistics.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be read.
    fn stats(&self) -> Result<StorageStats>;
}

impl<S: ReadingStore + ?Sized> ReadingStore for Box<S> {
    fn append(&self, reading: ValidReading) -> Result<Reading> {
        (**self).append(reading)
    }

    fn append_retaining(&self, reading: ValidReading, keep: usize) -> Result<Reading> {
        (**self).append_retaining(reading, keep)
    }

    fn list_all(&self) -> Result<Vec<Reading>> {
        (**self).list_all()
    }

    fn latest(&self) -> Result<Option<Reading>> {
        (**self).latest()
    }

    fn get(&self, sequence: i64) -> Result<Option<Reading>> {
        (**self).get(sequence)
    }

    fn count(&self) -> Result<u64> {
        (**self).count()
    }

    fn retain_recent(&self, keep: usize) -> Result<usize> {
        (**self).retain_recent(keep)
    }

    fn stats(&self) -> Result<StorageStats> {
        (**self).stats()
    }
}

impl<S: ReadingStore + ?Sized> ReadingStore for Arc<S> {
    fn append(&self, reading: ValidReading) -> Result<Reading> {
        (**self).append(reading)
    }

    fn append_retaining(&self, reading: ValidReading, keep: usize) -> Result<Reading> {
        (**self).append_retaining(reading, keep)
    }

    fn list_all(&self) -> Result<Vec<Reading>> {
        (**self).list_all()
    }

    fn latest(&self) -> Result<Option<Reading>> {
        (**self).latest()
    }

    fn get(&self, sequence: i64) -> Result<Option<Reading>> {
        (**self).get(sequence)
    }

    fn count(&self) -> Result<u64> {
        (**self).count()
    }

    fn retain_recent(&self, keep: usize) -> Result<usize> {
        (**self).retain_recent(keep)
    }

    fn stats(&self) -> Result<StorageStats> {
        (**self).stats()
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Total number of readings stored.
    pub total_readings: u64,
    /// Sequence position of the newest reading.
    pub last_sequence: Option<i64>,
    /// When the oldest retained reading was recorded.
    pub first_recorded: Option<DateTime<Utc>>,
    /// When the newest reading was recorded.
    pub last_recorded: Option<DateTime<Utc>>,
    /// Size of the database file in bytes (0 for in-memory stores).
    pub db_size_bytes: u64,
}
