// Public entities for the BSL Track API
// This module contains data structures that cross the application boundary

// Measurement entities and validation
pub mod measurement;

pub use measurement::{BslMeasurement, MeasurementType, SaveMeasurementRequest};
