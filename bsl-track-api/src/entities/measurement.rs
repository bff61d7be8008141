//! Wire entities for BSL measurements
//!
//! This is the validation layer: a candidate measurement is deserialized
//! into [`SaveMeasurementRequest`], checked against the value and type
//! constraints, and only then converted into a storage draft. The value
//! travels over the wire as a JSON number but is stored as fixed-point
//! tenths, so the one-decimal-digit constraint never depends on float
//! representation.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use bsl_track_data::models::measurement::{MeasurementDraft, MeasurementRecord};

/// Allowed measurement contexts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementType {
    /// Fasting measurement (the default)
    #[default]
    Fasting,
    /// Random (non-fasting) measurement
    Random,
}

impl MeasurementType {
    /// The lowercase wire/storage name of the variant
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementType::Fasting => "fasting",
            MeasurementType::Random => "random",
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a stored type string outside the enumerated set
#[derive(Debug, Error)]
#[error("unknown measurement type: {0}")]
pub struct UnknownMeasurementType(pub String);

impl FromStr for MeasurementType {
    type Err = UnknownMeasurementType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fasting" => Ok(MeasurementType::Fasting),
            "random" => Ok(MeasurementType::Random),
            other => Err(UnknownMeasurementType(other.to_string())),
        }
    }
}

/// Request payload for creating or updating a BSL measurement
///
/// The same shape serves both operations: the id must be absent on create
/// and present on update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SaveMeasurementRequest {
    /// Identifier of the measurement; null for a not-yet-persisted one
    #[serde(default)]
    pub id: Option<i64>,

    /// Measurement value; must be within [0, 100] with at most one decimal digit
    #[validate(custom = "validate_bsl_value")]
    pub value: f64,

    /// Measurement context; defaults to fasting
    #[serde(rename = "type", default)]
    pub measurement_type: MeasurementType,

    /// Calendar date of the measurement; defaults to today when omitted
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Time of day of the measurement; defaults to now when omitted
    #[serde(default)]
    pub time: Option<NaiveTime>,
}

impl SaveMeasurementRequest {
    /// Convert a validated request into a storage draft
    ///
    /// Must only be called after `validate()`: the fixed-point conversion
    /// assumes the value carries at most one decimal digit.
    pub fn into_draft(self) -> MeasurementDraft {
        MeasurementDraft {
            id: self.id,
            value_tenths: (self.value * 10.0).round() as i64,
            measurement_type: self.measurement_type.as_str().to_string(),
            date: self.date,
            time: self.time,
        }
    }
}

/// Public representation of a stored BSL measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BslMeasurement {
    /// Identifier assigned by the store
    pub id: i64,

    /// Measurement value
    pub value: f64,

    /// Measurement context
    #[serde(rename = "type")]
    pub measurement_type: MeasurementType,

    /// Calendar date of the measurement
    pub date: NaiveDate,

    /// Time of day of the measurement
    pub time: NaiveTime,
}

impl TryFrom<MeasurementRecord> for BslMeasurement {
    type Error = UnknownMeasurementType;

    fn try_from(record: MeasurementRecord) -> Result<Self, Self::Error> {
        let measurement_type = record.measurement_type.parse::<MeasurementType>()?;

        Ok(Self {
            id: record.id,
            value: record.value(),
            measurement_type,
            date: record.date,
            time: record.time,
        })
    }
}

/// Validate the BSL value constraint: finite, within [0, 100], and a
/// multiple of 0.1 (one decimal digit of precision)
fn validate_bsl_value(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        let mut error = ValidationError::new("finite");
        error.message = Some("value must be a finite number".into());
        return Err(error);
    }

    if !(0.0..=100.0).contains(&value) {
        let mut error = ValidationError::new("range");
        error.message = Some("value must be between 0 and 100".into());
        return Err(error);
    }

    // A true multiple of 0.1 lands within ~1e-13 of an integer after the
    // scale; anything looser would let near-misses like 5.49999999 round
    // silently to 5.5.
    let tenths = value * 10.0;
    if (tenths - tenths.round()).abs() > 1e-9 {
        let mut error = ValidationError::new("multiple_of");
        error.message = Some("value must be a multiple of 0.1".into());
        return Err(error);
    }

    Ok(())
}
