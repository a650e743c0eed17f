//! Core reading types for flightmonitor.
//!
//! This module defines the instrument reading record, the fields it is made
//! of, and the raw candidate shape that arrives from an operator before
//! validation.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest accepted altitude.
pub const ALTITUDE_MAX: u16 = 3000;

/// Highest accepted heading, in degrees.
pub const HEADING_MAX: u16 = 360;

/// Lowest accepted attitude value.
pub const ATTITUDE_MIN: i8 = -100;

/// Highest accepted attitude value.
pub const ATTITUDE_MAX: i8 = 100;

/// One of the three instrument fields carried by a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Altitude, 0 to 3000.
    Altitude,
    /// Heading indicator (HIS), 0 to 360 degrees.
    Heading,
    /// Attitude director indicator (ADI), -100 to 100.
    Attitude,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 3] = [Field::Altitude, Field::Heading, Field::Attitude];

    /// The field name used on the wire.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Altitude => "altitude",
            Self::Heading => "his",
            Self::Attitude => "adi",
        }
    }

    /// Short instrument label shown to operators.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Altitude => "Altitude",
            Self::Heading => "HIS",
            Self::Attitude => "ADI",
        }
    }

    /// Inclusive range of accepted values.
    #[must_use]
    pub fn range(self) -> RangeInclusive<i64> {
        match self {
            Self::Altitude => 0..=i64::from(ALTITUDE_MAX),
            Self::Heading => 0..=i64::from(HEADING_MAX),
            Self::Attitude => i64::from(ATTITUDE_MIN)..=i64::from(ATTITUDE_MAX),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Altitude => write!(f, "altitude"),
            Self::Heading => write!(f, "heading"),
            Self::Attitude => write!(f, "attitude"),
        }
    }
}

/// A raw, not yet coerced field value.
///
/// Transport layers hand over whatever they received: a JSON number, a form
/// string, or nothing at all. Coercion to an integer happens in
/// [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Field was absent or `null`.
    #[default]
    Missing,
    /// An integral JSON number.
    Integer(i64),
    /// A JSON number with a fractional representation.
    Float(f64),
    /// Free text, typically from a form field.
    Text(String),
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "<missing>"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

/// An operator submission before validation.
///
/// Deserializes from the wire body `{"altitude": .., "his": .., "adi": ..}`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Candidate {
    /// Raw altitude.
    #[serde(default)]
    pub altitude: RawValue,
    /// Raw heading.
    #[serde(default, rename = "his", alias = "heading")]
    pub heading: RawValue,
    /// Raw attitude.
    #[serde(default, rename = "adi", alias = "attitude")]
    pub attitude: RawValue,
}

impl Candidate {
    /// Build a candidate from any raw-convertible values.
    #[must_use]
    pub fn new(
        altitude: impl Into<RawValue>,
        heading: impl Into<RawValue>,
        attitude: impl Into<RawValue>,
    ) -> Self {
        Self {
            altitude: altitude.into(),
            heading: heading.into(),
            attitude: attitude.into(),
        }
    }

    /// The raw value submitted for a field.
    #[must_use]
    pub fn raw(&self, field: Field) -> &RawValue {
        match field {
            Field::Altitude => &self.altitude,
            Field::Heading => &self.heading,
            Field::Attitude => &self.attitude,
        }
    }
}

/// Field values that passed validation but have not been stored yet.
///
/// Only [`crate::validate::validate`] produces these, and only these can be
/// appended to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidReading {
    altitude: u16,
    heading: u16,
    attitude: i8,
}

impl ValidReading {
    pub(crate) fn new(altitude: u16, heading: u16, attitude: i8) -> Self {
        Self {
            altitude,
            heading,
            attitude,
        }
    }

    /// Validated altitude.
    #[must_use]
    pub fn altitude(&self) -> u16 {
        self.altitude
    }

    /// Validated heading in degrees.
    #[must_use]
    pub fn heading(&self) -> u16 {
        self.heading
    }

    /// Validated attitude.
    #[must_use]
    pub fn attitude(&self) -> i8 {
        self.attitude
    }

    /// Attach a history position and audit timestamp, producing a stored reading.
    pub(crate) fn into_reading(self, sequence: i64, recorded_at: DateTime<Utc>) -> Reading {
        Reading {
            sequence,
            altitude: self.altitude,
            heading: self.heading,
            attitude: self.attitude,
            recorded_at,
        }
    }
}

/// A stored instrument reading.
///
/// Readings are immutable once appended: there are no setters, and the only
/// way to obtain one is from a [`crate::storage::ReadingStore`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Reading {
    sequence: i64,
    altitude: u16,
    #[serde(rename = "his")]
    heading: u16,
    #[serde(rename = "adi")]
    attitude: i8,
    recorded_at: DateTime<Utc>,
}

impl Reading {
    /// Position in the history, starting at 1.
    #[must_use]
    pub fn sequence(&self) -> i64 {
        self.sequence
    }

    /// Altitude, 0 to 3000.
    #[must_use]
    pub fn altitude(&self) -> u16 {
        self.altitude
    }

    /// Heading in degrees, 0 to 360.
    #[must_use]
    pub fn heading(&self) -> u16 {
        self.heading
    }

    /// Attitude, -100 to 100.
    #[must_use]
    pub fn attitude(&self) -> i8 {
        self.attitude
    }

    /// When the store accepted this reading.
    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// The numeric value of a field.
    #[must_use]
    pub fn value(&self, field: Field) -> i64 {
        match field {
            Field::Altitude => i64::from(self.altitude),
            Field::Heading => i64::from(self.heading),
            Field::Attitude => i64::from(self.attitude),
        }
    }

    /// True when both readings carry the same instrument values.
    #[must_use]
    pub fn same_values(&self, other: &Self) -> bool {
        self.altitude == other.altitude
            && self.heading == other.heading
            && self.attitude == other.attitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_wire_names() {
        assert_eq!(Field::Altitude.wire_name(), "altitude");
        assert_eq!(Field::Heading.wire_name(), "his");
        assert_eq!(Field::Attitude.wire_name(), "adi");
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::Altitude.to_string(), "altitude");
        assert_eq!(Field::Heading.to_string(), "heading");
        assert_eq!(Field::Attitude.to_string(), "attitude");
    }

    #[test]
    fn test_field_ranges() {
        assert_eq!(Field::Altitude.range(), 0..=3000);
        assert_eq!(Field::Heading.range(), 0..=360);
        assert_eq!(Field::Attitude.range(), -100..=100);
    }

    #[test]
    fn test_candidate_from_wire_body() {
        let json = r#"{"altitude": 1500, "his": "90", "adi": 0}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();

        assert_eq!(candidate.altitude, RawValue::Integer(1500));
        assert_eq!(candidate.heading, RawValue::Text("90".to_string()));
        assert_eq!(candidate.attitude, RawValue::Integer(0));
    }

    #[test]
    fn test_candidate_accepts_semantic_aliases() {
        let json = r#"{"altitude": 10, "heading": 20, "attitude": -30}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();

        assert_eq!(candidate.heading, RawValue::Integer(20));
        assert_eq!(candidate.attitude, RawValue::Integer(-30));
    }

    #[test]
    fn test_candidate_missing_and_null_fields() {
        let json = r#"{"altitude": null}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();

        assert_eq!(candidate.altitude, RawValue::Missing);
        assert_eq!(candidate.heading, RawValue::Missing);
        assert_eq!(candidate.attitude, RawValue::Missing);
    }

    #[test]
    fn test_candidate_float_value() {
        let json = r#"{"altitude": 12.5, "his": 1, "adi": 1}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.altitude, RawValue::Float(12.5));
    }

    #[test]
    fn test_reading_serializes_wire_names() {
        let reading = ValidReading::new(1500, 90, 0).into_reading(1, Utc::now());
        let json = serde_json::to_value(&reading).unwrap();

        assert_eq!(json["sequence"], 1);
        assert_eq!(json["altitude"], 1500);
        assert_eq!(json["his"], 90);
        assert_eq!(json["adi"], 0);
        assert!(json.get("recorded_at").is_some());
    }

    #[test]
    fn test_reading_value_lookup() {
        let reading = ValidReading::new(100, 200, -50).into_reading(3, Utc::now());
        assert_eq!(reading.value(Field::Altitude), 100);
        assert_eq!(reading.value(Field::Heading), 200);
        assert_eq!(reading.value(Field::Attitude), -50);
        assert_eq!(reading.sequence(), 3);
    }

    #[test]
    fn test_same_values_ignores_position() {
        let a = ValidReading::new(1, 2, 3).into_reading(1, Utc::now());
        let b = ValidReading::new(1, 2, 3).into_reading(2, Utc::now());
        let c = ValidReading::new(1, 2, 4).into_reading(3, Utc::now());
        assert!(a.same_values(&b));
        assert!(!a.same_values(&c));
    }

    #[test]
    fn test_raw_value_display() {
        assert_eq!(RawValue::Missing.to_string(), "<missing>");
        assert_eq!(RawValue::Integer(5).to_string(), "5");
        assert_eq!(RawValue::from("abc").to_string(), "\"abc\"");
    }
}
