//! Reading submission and history queries.
//!
//! [`Recorder`] is the single entry point transports call: it validates a
//! candidate, appends it to the injected store, and applies the configured
//! retention limit.

use crate::error::Result;
use crate::reading::{Candidate, Reading};
use crate::storage::ReadingStore;
use crate::validate::validate;

/// Validates and records instrument readings.
#[derive(Debug)]
pub struct Recorder<S> {
    store: S,
    max_readings: usize,
}

impl<S: ReadingStore> Recorder<S> {
    /// Create a recorder over a store with unbounded history.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_readings: 0,
        }
    }

    /// Keep at most `max_readings` readings. 0 means unlimited.
    #[must_use]
    pub fn with_retention(mut self, max_readings: usize) -> Self {
        self.max_readings = max_readings;
        self
    }

    /// The configured retention limit (0 for unlimited).
    #[must_use]
    pub fn max_readings(&self) -> usize {
        self.max_readings
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate a candidate and append it to the history.
    ///
    /// Nothing is stored unless every field passes. The append and the
    /// retention prune commit together, so a storage error means nothing
    /// was recorded and the submission can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] naming every offending field, or a
    /// storage error if the append fails.
    pub fn submit(&self, candidate: &Candidate) -> Result<Reading> {
        let valid = validate(candidate)?;
        self.store.append_retaining(valid, self.max_readings)
    }

    /// The full history in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    pub fn list_all(&self) -> Result<Vec<Reading>> {
        self.store.list_all()
    }

    /// The most recent reading.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    pub fn latest(&self) -> Result<Option<Reading>> {
        self.store.latest()
    }

    /// The reading at a sequence position.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be read.
    pub fn get(&self, sequence: i64) -> Result<Option<Reading>> {
        self.store.get(sequence)
    }
}
