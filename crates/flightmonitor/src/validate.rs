//! Candidate validation.
//!
//! Validation runs in two phases. Every field is first coerced to an integer;
//! if any field cannot be coerced, the candidate is rejected with a
//! [`ValidationKind::NotANumber`] entry per offending field and no range
//! check runs. Otherwise every field is range-checked and all failures are
//! reported together.

use serde::Serialize;

use crate::reading::{Candidate, Field, RawValue, ValidReading};

/// What went wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    /// The value could not be read as an integer.
    NotANumber,
    /// The value is an integer outside the field's range.
    OutOfRange,
}

/// A single field failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The failed constraint.
    pub kind: ValidationKind,
    /// The offending field.
    pub field: Field,
    /// What was submitted, for messaging.
    pub value: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let range = self.field.range();
        match self.kind {
            ValidationKind::NotANumber => {
                write!(f, "{} is not a number: {}", self.field, self.value)
            }
            ValidationKind::OutOfRange => write!(
                f,
                "{} must be between {} and {} (got {})",
                self.field,
                range.start(),
                range.end(),
                self.value
            ),
        }
    }
}

/// Every field failure found in one candidate. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Iterate over the individual failures.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The failing fields, in field order.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        self.0.iter().map(|e| e.field).collect()
    }

    /// The failure recorded for a field, if any.
    #[must_use]
    pub fn for_field(&self, field: Field) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Coerce a raw value to an integer.
///
/// Integral floats (`1500.0`) and numeric strings (`" 90 "`) are accepted;
/// anything with a fractional part, non-finite, empty, or missing is not.
#[must_use]
pub fn coerce(raw: &RawValue) -> Option<i64> {
    match raw {
        RawValue::Missing => None,
        RawValue::Integer(v) => Some(*v),
        RawValue::Float(v) => integral(*v),
        RawValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
    }
}

// Out-of-range magnitudes saturate and then fail the range check.
#[allow(clippy::cast_possible_truncation)]
fn integral(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 {
        Some(v as i64)
    } else {
        None
    }
}

/// Validate a candidate against the instrument ranges.
///
/// # Errors
///
/// Returns every failing field. If any field is not a number, only
/// `NotANumber` failures are reported.
pub fn validate(candidate: &Candidate) -> Result<ValidReading, ValidationErrors> {
    let mut errors = Vec::new();
    let mut values = [0i64; 3];

    for (slot, field) in values.iter_mut().zip(Field::ALL) {
        let raw = candidate.raw(field);
        match coerce(raw) {
            Some(v) => *slot = v,
            None => errors.push(ValidationError {
                kind: ValidationKind::NotANumber,
                field,
                value: raw.to_string(),
            }),
        }
    }
    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }

    let [altitude, heading, attitude] = values;
    let altitude = checked::<u16>(Field::Altitude, altitude, &mut errors);
    let heading = checked::<u16>(Field::Heading, heading, &mut errors);
    let attitude = checked::<i8>(Field::Attitude, attitude, &mut errors);

    match (altitude, heading, attitude) {
        (Some(a), Some(h), Some(d)) => Ok(ValidReading::new(a, h, d)),
        _ => Err(ValidationErrors(errors)),
    }
}

fn checked<T: TryFrom<i64>>(
    field: Field,
    value: i64,
    errors: &mut Vec<ValidationError>,
) -> Option<T> {
    let converted = if field.range().contains(&value) {
        T::try_from(value).ok()
    } else {
        None
    };
    if converted.is_none() {
        errors.push(ValidationError {
            kind: ValidationKind::OutOfRange,
            field,
            value: value.to_string(),
        });
    }
    converted
}
