//! Instrument projection.
//!
//! Maps a stored reading to the parameters a visual display needs: the
//! attitude disc class, the compass needle angle, and the altitude gauge
//! fraction. Projection is a pure function of the reading's instrument
//! values.

use serde::Serialize;

use crate::reading::{Reading, ALTITUDE_MAX, HEADING_MAX};

/// Attitude disc classification.
///
/// Partitions every attitude value by sign. The presentation layer picks the
/// actual color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttitudeClass {
    /// Positive attitude (1 to 100).
    Nominal,
    /// Exactly zero.
    Neutral,
    /// Negative attitude (-100 to -1).
    Alert,
}

impl AttitudeClass {
    /// Classify an attitude value.
    #[must_use]
    pub fn of(attitude: i8) -> Self {
        match attitude {
            1.. => Self::Nominal,
            0 => Self::Neutral,
            _ => Self::Alert,
        }
    }

    /// Conventional display color for this class.
    #[must_use]
    pub fn color_name(self) -> &'static str {
        match self {
            Self::Nominal => "blue",
            Self::Neutral => "green",
            Self::Alert => "gray",
        }
    }
}

impl std::fmt::Display for AttitudeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nominal => write!(f, "nominal"),
            Self::Neutral => write!(f, "neutral"),
            Self::Alert => write!(f, "alert"),
        }
    }
}

/// Rendering parameters for the visual view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualParams {
    /// Attitude disc class.
    pub attitude_class: AttitudeClass,
    /// Needle rotation in degrees clockwise from north, in `[0, 360)`.
    pub heading_angle_deg: f64,
    /// Altitude normalized to `[0, 1]`.
    pub altitude_fraction: f64,
}

impl VisualParams {
    /// Distance of the altitude arrow from the top of a gauge `span` units tall.
    ///
    /// A full gauge puts the arrow at the top (0), an empty one at the bottom.
    #[must_use]
    pub fn arrow_offset(&self, span: f64) -> f64 {
        span * (1.0 - self.altitude_fraction)
    }

    /// Height of the gauge fill for a gauge `span` units tall.
    #[must_use]
    pub fn fill_height(&self, span: f64) -> f64 {
        span * self.altitude_fraction
    }
}

/// Project a reading onto display parameters.
#[must_use]
pub fn project(reading: &Reading) -> VisualParams {
    VisualParams {
        attitude_class: AttitudeClass::of(reading.attitude()),
        heading_angle_deg: heading_angle(reading.heading()),
        altitude_fraction: altitude_fraction(reading.altitude()),
    }
}

/// Heading folded into `[0, 360)`; 360 maps to 0.
#[must_use]
pub fn heading_angle(heading: u16) -> f64 {
    f64::from(heading % HEADING_MAX)
}

/// Altitude over the gauge maximum, clamped to `[0, 1]`.
#[must_use]
pub fn altitude_fraction(altitude: u16) -> f64 {
    (f64::from(altitude) / f64::from(ALTITUDE_MAX)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Candidate;
    use crate::storage::{MemoryStore, ReadingStore};
    use crate::validate::validate;
    use proptest::prelude::*;

    fn reading(altitude: i64, heading: i64, attitude: i64) -> Reading {
        let store = MemoryStore::new();
        let valid = validate(&Candidate::new(altitude, heading, attitude)).unwrap();
        store.append(valid).unwrap()
    }

    #[test]
    fn test_altitude_fraction_endpoints() {
        assert!((project(&reading(0, 0, 0)).altitude_fraction - 0.0).abs() < f64::EPSILON);
        assert!((project(&reading(3000, 0, 0)).altitude_fraction - 1.0).abs() < f64::EPSILON);
        assert!((project(&reading(1500, 0, 0)).altitude_fraction - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_altitude_fraction_clamped() {
        assert!((altitude_fraction(u16::MAX) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_heading_angle() {
        assert!((project(&reading(0, 0, 0)).heading_angle_deg - 0.0).abs() < f64::EPSILON);
        assert!((project(&reading(0, 90, 0)).heading_angle_deg - 90.0).abs() < f64::EPSILON);
        assert!((project(&reading(0, 359, 0)).heading_angle_deg - 359.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_heading_360_folds_to_zero() {
        let params = project(&reading(0, 360, 0));
        assert!(params.heading_angle_deg.abs() < f64::EPSILON);
    }

    #[test]
    fn test_attitude_partition() {
        assert_eq!(AttitudeClass::of(100), AttitudeClass::Nominal);
        assert_eq!(AttitudeClass::of(1), AttitudeClass::Nominal);
        assert_eq!(AttitudeClass::of(0), AttitudeClass::Neutral);
        assert_eq!(AttitudeClass::of(-1), AttitudeClass::Alert);
        assert_eq!(AttitudeClass::of(-100), AttitudeClass::Alert);
    }

    #[test]
    fn test_attitude_partition_is_total() {
        for value in i8::MIN..=i8::MAX {
            let class = AttitudeClass::of(value);
            let expected = match value.signum() {
                1 => AttitudeClass::Nominal,
                0 => AttitudeClass::Neutral,
                _ => AttitudeClass::Alert,
            };
            assert_eq!(class, expected, "attitude {value}");
        }
    }

    #[test]
    fn test_binary_attitude_colors() {
        assert_eq!(AttitudeClass::of(100).color_name(), "blue");
        assert_eq!(AttitudeClass::of(0).color_name(), "green");
        assert_eq!(AttitudeClass::of(-50).color_name(), "gray");
    }

    #[test]
    fn test_arrow_offset_matches_gauge() {
        let params = project(&reading(1000, 0, 0));
        assert!((params.arrow_offset(300.0) - 200.0).abs() < 1e-9);
        assert!((params.fill_height(300.0) - 100.0).abs() < 1e-9);

        let top = project(&reading(3000, 0, 0));
        assert!(top.arrow_offset(300.0).abs() < f64::EPSILON);

        let bottom = project(&reading(0, 0, 0));
        assert!((bottom.arrow_offset(300.0) - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_attitude_class_display() {
        assert_eq!(AttitudeClass::Nominal.to_string(), "nominal");
        assert_eq!(AttitudeClass::Neutral.to_string(), "neutral");
        assert_eq!(AttitudeClass::Alert.to_string(), "alert");
    }

    #[test]
    fn test_visual_params_serialize() {
        let json = serde_json::to_value(project(&reading(1500, 90, 0))).unwrap();
        assert_eq!(json["attitude_class"], "neutral");
        assert_eq!(json["heading_angle_deg"], 90.0);
        assert_eq!(json["altitude_fraction"], 0.5);
    }

    proptest! {
        #[test]
        fn prop_projection_is_deterministic(
            altitude in 0i64..=3000,
            heading in 0i64..=360,
            attitude in -100i64..=100,
        ) {
            let a = reading(altitude, heading, attitude);
            let b = reading(altitude, heading, attitude);
            prop_assert_eq!(project(&a), project(&a));
            prop_assert_eq!(project(&a), project(&b));
        }

        #[test]
        fn prop_projection_is_bounded(
            altitude in 0i64..=3000,
            heading in 0i64..=360,
            attitude in -100i64..=100,
        ) {
            let params = project(&reading(altitude, heading, attitude));
            prop_assert!((0.0..=1.0).contains(&params.altitude_fraction));
            prop_assert!((0.0..360.0).contains(&params.heading_angle_deg));
        }
    }
}
