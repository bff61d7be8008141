use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Storage model for a BSL measurement row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Row identifier assigned by the store
    pub id: i64,

    /// Measurement value in tenths of a unit (fixed-point, one decimal digit)
    pub value_tenths: i64,

    /// Measurement context ("fasting" or "random")
    pub measurement_type: String,

    /// Calendar date of the measurement
    pub date: NaiveDate,

    /// Time of day of the measurement
    pub time: NaiveTime,
}

impl MeasurementRecord {
    /// The measurement value as a decimal number
    pub fn value(&self) -> f64 {
        self.value_tenths as f64 / 10.0
    }
}

/// Field values for inserting a new row or fully overwriting an existing one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementDraft {
    /// Must be absent for create, present for update
    pub id: Option<i64>,

    /// Measurement value in tenths of a unit
    pub value_tenths: i64,

    /// Measurement context ("fasting" or "random")
    pub measurement_type: String,

    /// Calendar date; defaults to the current date at write time when absent
    pub date: Option<NaiveDate>,

    /// Time of day; defaults to the current time at write time when absent
    pub time: Option<NaiveTime>,
}
