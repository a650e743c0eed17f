//! In-memory reading store.

use std::collections::VecDeque;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use super::{ReadingStore, StorageStats};
use crate::error::{Error, Result};
use crate::reading::{Reading, ValidReading};

#[derive(Debug, Default)]
struct History {
    readings: VecDeque<Reading>,
    next_sequence: i64,
}

/// A process-local reading store.
///
/// Appends take the write lock for the whole append, so concurrent
/// submissions are serialized and each gets a distinct position. Reads
/// clone a snapshot under the read lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    history: RwLock<History>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, History>> {
        self.history
            .read()
            .map_err(|_| Error::storage_unavailable("history lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, History>> {
        self.history
            .write()
            .map_err(|_| Error::storage_unavailable("history lock poisoned"))
    }
}

impl History {
    fn push(&mut self, reading: ValidReading) -> Reading {
        self.next_sequence += 1;
        let stored = reading.into_reading(self.next_sequence, Utc::now());
        self.readings.push_back(stored.clone());
        stored
    }

    fn prune(&mut self, keep: usize) -> usize {
        let excess = self.readings.len().saturating_sub(keep);
        self.readings.drain(..excess);
        excess
    }
}

impl ReadingStore for MemoryStore {
    fn append(&self, reading: ValidReading) -> Result<Reading> {
        Ok(self.write()?.push(reading))
    }

    fn append_retaining(&self, reading: ValidReading, keep: usize) -> Result<Reading> {
        let mut history = self.write()?;
        let stored = history.push(reading);
        if keep > 0 {
            history.prune(keep);
        }
        Ok(stored)
    }

    fn list_all(&self) -> Result<Vec<Reading>> {
        Ok(self.read()?.readings.iter().cloned().collect())
    }

    fn latest(&self) -> Result<Option<Reading>> {
        Ok(self.read()?.readings.back().cloned())
    }

    fn get(&self, sequence: i64) -> Result<Option<Reading>> {
        let history = self.read()?;
        // Sequences are strictly increasing, so the deque is sorted by them.
        Ok(history
            .readings
            .binary_search_by_key(&sequence, Reading::sequence)
            .ok()
            .and_then(|idx| history.readings.get(idx).cloned()))
    }

    fn count(&self) -> Result<u64> {
        Ok(self.read()?.readings.len() as u64)
    }

    fn retain_recent(&self, keep: usize) -> Result<usize> {
        Ok(self.write()?.prune(keep))
    }

    fn stats(&self) -> Result<StorageStats> {
        let history = self.read()?;
        Ok(StorageStats {
            total_readings: history.readings.len() as u64,
            last_sequence: history.readings.back().map(Reading::sequence),
            first_recorded: history.readings.front().map(Reading::recorded_at),
            last_recorded: history.readings.back().map(Reading::recorded_at),
            db_size_bytes: 0,
        })
    }
}
