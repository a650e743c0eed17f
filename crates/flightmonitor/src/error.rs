//! Error types for flightmonitor.
//!
//! This module defines all error types used throughout the flightmonitor crate.
//! Bad input and infrastructure failures are kept apart so callers can retry
//! the latter without ever retrying the former.

use std::path::PathBuf;
use thiserror::Error;

use crate::validate::ValidationErrors;

/// The main error type for flightmonitor operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    /// A candidate reading was rejected.
    #[error("invalid reading: {0}")]
    Validation(#[from] ValidationErrors),

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// The backing store cannot serve requests.
    #[error("storage unavailable: {message}")]
    StorageUnavailable {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for flightmonitor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error classification for callers deciding what to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input was bad; retrying the same input will fail again.
    Validation,
    /// The store failed; the caller may retry.
    StorageUnavailable,
    /// Configuration could not be loaded or is invalid.
    Configuration,
    /// Anything else.
    Other,
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a storage unavailable error.
    #[must_use]
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::DatabaseOpen { .. }
            | Self::DatabaseQuery(_)
            | Self::DatabaseMigration { .. }
            | Self::StorageUnavailable { .. }
            | Self::DirectoryCreate { .. } => ErrorKind::StorageUnavailable,
            Self::ConfigLoad(_) | Self::ConfigValidation { .. } => ErrorKind::Configuration,
            Self::Io(_) | Self::Json(_) | Self::Internal(_) => ErrorKind::Other,
        }
    }

    /// Check if this error is a rejected reading.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Check if this error came from the backing store.
    #[must_use]
    pub fn is_storage_unavailable(&self) -> bool {
        self.kind() == ErrorKind::StorageUnavailable
    }

    /// The validation failures, if this is a rejected reading.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{Candidate, Field};
    use crate::validate::validate;

    fn validation_error() -> Error {
        validate(&Candidate::new(4000, 0, 0)).unwrap_err().into()
    }

    #[test]
    fn test_error_display() {
        let err = Error::storage_unavailable("lock poisoned");
        assert_eq!(err.to_string(), "storage unavailable: lock poisoned");

        let err = validation_error();
        assert_eq!(
            err.to_string(),
            "invalid reading: altitude must be between 0 and 3000 (got 4000)"
        );
    }

    #[test]
    fn test_validation_kind() {
        let err = validation_error();
        assert!(err.is_validation());
        assert!(!err.is_storage_unavailable());
        assert_eq!(err.kind(), ErrorKind::Validation);

        let fields = err.validation_errors().unwrap().fields();
        assert_eq!(fields, vec![Field::Altitude]);
    }

    #[test]
    fn test_storage_kind() {
        let err = Error::storage_unavailable("down");
        assert!(err.is_storage_unavailable());
        assert!(!err.is_validation());
        assert!(err.validation_errors().is_none());

        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
    }

    #[test]
    fn test_config_kind() {
        let err = Error::ConfigValidation {
            message: "gauge_height".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
            assert!(err.is_storage_unavailable());
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
        assert!(err.is_storage_unavailable());
    }
}
