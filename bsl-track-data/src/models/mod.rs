// Data storage models for BSL measurements

pub mod measurement;

pub use measurement::{MeasurementDraft, MeasurementRecord};
