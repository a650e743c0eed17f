//! `flightmonitor` - Flight instrument reading recorder
//!
//! This library validates altitude, heading (HIS) and attitude (ADI)
//! readings, keeps accepted ones in an append-only history, and projects a
//! reading onto the parameters of a visual instrument display.
//!
//! ```
//! use flightmonitor::{project, AttitudeClass, Candidate, MemoryStore, Recorder};
//!
//! let recorder = Recorder::new(MemoryStore::new());
//! let reading = recorder.submit(&Candidate::new(1500, "90", 0)).unwrap();
//!
//! let params = project(&reading);
//! assert_eq!(params.altitude_fraction, 0.5);
//! assert_eq!(params.heading_angle_deg, 90.0);
//! assert_eq!(params.attitude_class, AttitudeClass::Neutral);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod projector;
pub mod reading;
pub mod recorder;
pub mod render;
pub mod storage;
pub mod validate;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use logging::init_logging;
pub use projector::{project, AttitudeClass, VisualParams};
pub use reading::{Candidate, Field, RawValue, Reading, ValidReading};
pub use recorder::Recorder;
pub use render::{Renderer, View};
pub use storage::{MemoryStore, ReadingStore, SqliteStore, StorageStats};
pub use validate::{validate, ValidationError, ValidationErrors, ValidationKind};
